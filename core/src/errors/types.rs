//! Error types for the OTP guard, authentication flows and access tokens

use jt_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

use crate::domain::entities::OtpModule;
use crate::domain::value_objects::{BlockDuration, RemainingTime};

/// Errors raised by the OTP verification and lockout guard
///
/// Wrong-attempt counts are never carried here; callers only learn that a
/// code was wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Account temporarily blocked. Please try again in {remaining}")]
    AccountBlocked { remaining: RemainingTime },

    #[error("OTP limit exceeded for {module}. Account blocked for {block}")]
    RateLimitExceeded {
        module: OtpModule,
        block: BlockDuration,
    },

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("Too many wrong OTP attempts. Account blocked for {block}")]
    TooManyWrongAttempts { block: BlockDuration },

    #[error("Verification service temporarily unavailable")]
    StoreUnavailable,

    #[error("Invalid module: {module}")]
    InvalidModule { module: String },

    #[error("User account is deactivated")]
    AccountInactive,
}

impl OtpError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountBlocked { .. } => error_codes::ACCOUNT_BLOCKED,
            Self::RateLimitExceeded { .. } => error_codes::RATE_LIMIT_EXCEEDED,
            Self::InvalidOtp => error_codes::INVALID_OTP,
            Self::TooManyWrongAttempts { .. } => error_codes::TOO_MANY_WRONG_ATTEMPTS,
            Self::StoreUnavailable => error_codes::STORE_UNAVAILABLE,
            Self::InvalidModule { .. } => error_codes::INVALID_MODULE,
            Self::AccountInactive => error_codes::ACCOUNT_INACTIVE,
        }
    }
}

impl IntoErrorResponse for OtpError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.error_code(), self.to_string());
        match self {
            Self::AccountBlocked { remaining } => {
                response.add_detail("remaining_seconds", remaining.seconds())
            }
            Self::RateLimitExceeded { module, block } => response
                .add_detail("module", module.as_str())
                .add_detail("block_seconds", block.seconds()),
            Self::TooManyWrongAttempts { block } => {
                response.add_detail("block_seconds", block.seconds())
            }
            Self::InvalidModule { module } => response.add_detail("module", module),
            _ => response,
        }
    }
}

/// Account-level authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid email or password")]
    InvalidCredentials,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound => error_codes::USER_NOT_FOUND,
            Self::UserAlreadyExists => error_codes::USER_ALREADY_EXISTS,
            Self::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
        }
    }
}

/// Access token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to generate access token")]
    TokenGenerationFailed,

    #[error("Invalid access token")]
    InvalidToken,

    #[error("Access token expired")]
    TokenExpired,
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        error_codes::TOKEN_INVALID
    }
}
