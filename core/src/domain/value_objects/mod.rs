//! Value objects: store key layout and human-readable durations.

pub mod otp_keys;
pub mod remaining_time;

pub use otp_keys::{OtpKeys, BLOCKED_SENTINEL};
pub use remaining_time::{BlockDuration, RemainingTime};
