//! # Job Tracker Core
//!
//! Core business logic for the Job Tracker backend.
//! This crate contains the OTP verification and lockout guard, the
//! authentication flows built on it, access token handling, repository
//! interfaces and the error types shared by all of them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
