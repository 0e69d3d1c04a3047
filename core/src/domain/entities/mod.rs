//! Domain entities representing core business objects.

pub mod otp_code;
pub mod otp_module;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use otp_code::OtpCode;
pub use otp_module::OtpModule;
pub use token::{AccessToken, Claims, TOKEN_TYPE_BEARER};
pub use user::User;
