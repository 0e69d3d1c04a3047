//! Authentication service module
//!
//! Orchestrates account preconditions around the OTP guard:
//! - Registration with pending accounts activated by OTP
//! - Password sign-in gated by a login OTP
//! - Password recovery gated by a forget-password OTP
//! - Access token issuance after verification

mod config;
mod service;
mod types;


pub use config::AuthServiceConfig;
pub use service::AuthService;
pub use types::{LoginRequest, RegisterRequest, VerifiedSession};
