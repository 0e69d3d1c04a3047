//! One-time passcode value.

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::fmt;

/// Default number of digits in an issued code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// A numeric one-time passcode
///
/// Leading zeros are significant: `"012345"` is a valid six-digit code.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generate a uniformly random numeric code of `length` digits using the OS CSPRNG
    pub fn generate(length: usize) -> Self {
        let mut rng = OsRng;
        let code = (0..length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        Self(code)
    }

    /// Wrap a code read back from the store
    pub fn from_stored(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison against user input in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        let stored = self.0.as_bytes();
        let candidate = candidate.as_bytes();
        stored.len() == candidate.len() && constant_time_eq(stored, candidate)
    }
}

// Codes are secrets; keep them out of debug logs.
impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OtpCode(***)")
    }
}
