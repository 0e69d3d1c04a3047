//! Business services containing domain logic and use cases.

pub mod auth;
pub mod otp;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, LoginRequest, RegisterRequest, VerifiedSession};
pub use otp::{
    AccountDirectory, KeyValueStore, NotifyError, OtpGuard, OtpIssued, OtpNotifier, OtpVerified,
    StoreError,
};
pub use token::TokenService;
