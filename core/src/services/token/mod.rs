//! Token service module for access token management
//!
//! Issues and verifies HS256-signed bearer tokens handed out after a
//! successful OTP verification.

mod service;

#[cfg(test)]
mod tests;

pub use service::TokenService;
