//! Shared utilities and common types for the Job Tracker server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response envelope and error codes
//! - Email helpers (validation, masking for logs)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, EmailConfig, EmailProvider, Environment, JwtConfig,
    LogFormat, LoggingConfig, OtpPolicyConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use utils::email;
