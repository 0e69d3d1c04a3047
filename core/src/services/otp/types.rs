//! Result types returned by the OTP guard

use serde::{Deserialize, Serialize};

use crate::domain::entities::OtpModule;

/// Outcome of a successful `request_otp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpIssued {
    pub module: OtpModule,
    pub message: String,
    /// Advisory count of further requests before the module is blocked
    pub attempts_remaining: u32,
    /// Lifetime of the issued code
    pub expires_in_seconds: u64,
}

/// Outcome of a successful `verify_otp`
///
/// The caller is expected to issue a session credential next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpVerified {
    pub email: String,
    pub module: OtpModule,
}
