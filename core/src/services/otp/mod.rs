//! OTP verification and lockout guard
//!
//! Gates every credential-sensitive flow behind a one-time passcode with:
//! - Per-module request limits and request-limit blocks
//! - Wrong-attempt counting and lockout
//! - Post-verification account checks (activation, active status)

mod guard;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use guard::OtpGuard;
pub use traits::{AccountDirectory, KeyValueStore, NotifyError, OtpNotifier, StoreError};
pub use types::{OtpIssued, OtpVerified};
