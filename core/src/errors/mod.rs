//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, OtpError, TokenError};

use jt_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Stable machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => error_codes::VALIDATION_ERROR,
            Self::NotFound { .. } => error_codes::USER_NOT_FOUND,
            Self::Database { .. } | Self::Internal { .. } => error_codes::INTERNAL_ERROR,
            Self::Otp(err) => err.error_code(),
            Self::Auth(err) => err.error_code(),
            Self::Token(err) => err.error_code(),
        }
    }

    /// The wrapped guard error, if any
    pub fn as_otp(&self) -> Option<&OtpError> {
        match self {
            Self::Otp(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            Self::Otp(err) => err.to_error_response(),
            // Storage details stay in the logs
            Self::Database { .. } | Self::Internal { .. } => {
                ErrorResponse::new(self.error_code(), "Internal server error")
            }
            _ => ErrorResponse::new(self.error_code(), self.to_string()),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
