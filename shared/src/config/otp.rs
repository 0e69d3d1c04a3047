//! OTP policy configuration
//!
//! Request quotas, wrong-attempt thresholds and every TTL the OTP guard
//! writes to the key-value store. All durations are in seconds.

use serde::{Deserialize, Serialize};

use super::env_or;

/// OTP issuance and lockout policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpPolicyConfig {
    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Lifetime of an issued code
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: u64,

    /// OTP requests allowed per module within one request window
    #[serde(default = "default_request_limit")]
    pub request_limit: u32,

    /// Lifetime of the request counter, set on its first write
    #[serde(default = "default_request_window")]
    pub request_window_seconds: u64,

    /// Block applied to the register module when the request limit is hit
    #[serde(default = "default_register_block")]
    pub register_block_seconds: u64,

    /// Block applied to other modules when the request limit is hit
    #[serde(default = "default_request_block")]
    pub request_block_seconds: u64,

    /// Wrong codes tolerated before the pair is blocked
    #[serde(default = "default_wrong_attempt_limit")]
    pub wrong_attempt_limit: u32,

    /// Lifetime of the wrong-attempt counter, set on its first write
    #[serde(default = "default_wrong_attempt_window")]
    pub wrong_attempt_window_seconds: u64,

    /// Block applied after too many wrong codes
    #[serde(default = "default_wrong_attempt_block")]
    pub wrong_attempt_block_seconds: u64,
}

impl Default for OtpPolicyConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            code_ttl_seconds: default_code_ttl(),
            request_limit: default_request_limit(),
            request_window_seconds: default_request_window(),
            register_block_seconds: default_register_block(),
            request_block_seconds: default_request_block(),
            wrong_attempt_limit: default_wrong_attempt_limit(),
            wrong_attempt_window_seconds: default_wrong_attempt_window(),
            wrong_attempt_block_seconds: default_wrong_attempt_block(),
        }
    }
}

impl OtpPolicyConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            code_length: default_code_length(),
            code_ttl_seconds: env_or("OTP_EXPIRY_SECONDS", default_code_ttl()),
            request_limit: env_or("OTP_REQUEST_LIMIT", default_request_limit()),
            request_window_seconds: env_or("OTP_REQUEST_WINDOW_SECONDS", default_request_window()),
            register_block_seconds: env_or("OTP_REGISTER_BLOCK_SECONDS", default_register_block()),
            request_block_seconds: env_or("OTP_REQUEST_BLOCK_SECONDS", default_request_block()),
            wrong_attempt_limit: env_or("OTP_WRONG_ATTEMPT_LIMIT", default_wrong_attempt_limit()),
            wrong_attempt_window_seconds: env_or(
                "OTP_WRONG_ATTEMPT_WINDOW_SECONDS",
                default_wrong_attempt_window(),
            ),
            wrong_attempt_block_seconds: env_or(
                "OTP_WRONG_ATTEMPT_BLOCK_SECONDS",
                default_wrong_attempt_block(),
            ),
        }
    }

    /// Code lifetime in whole minutes, as quoted in the OTP email
    pub fn code_ttl_minutes(&self) -> u64 {
        self.code_ttl_seconds / 60
    }
}

fn default_code_length() -> usize {
    6
}

fn default_code_ttl() -> u64 {
    300 // 5 minutes
}

fn default_request_limit() -> u32 {
    4
}

fn default_request_window() -> u64 {
    24 * 3600
}

fn default_register_block() -> u64 {
    1200 // 20 minutes
}

fn default_request_block() -> u64 {
    86400 // 24 hours
}

fn default_wrong_attempt_limit() -> u32 {
    5
}

fn default_wrong_attempt_window() -> u64 {
    3600
}

fn default_wrong_attempt_block() -> u64 {
    1800 // 30 minutes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_policy_defaults() {
        let config = OtpPolicyConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.code_ttl_seconds, 300);
        assert_eq!(config.code_ttl_minutes(), 5);
        assert_eq!(config.request_limit, 4);
        assert_eq!(config.request_window_seconds, 86400);
        assert_eq!(config.register_block_seconds, 1200);
        assert_eq!(config.request_block_seconds, 86400);
        assert_eq!(config.wrong_attempt_limit, 5);
        assert_eq!(config.wrong_attempt_window_seconds, 3600);
        assert_eq!(config.wrong_attempt_block_seconds, 1800);
    }

    #[test]
    fn test_otp_policy_deserialize_partial() {
        let config: OtpPolicyConfig =
            serde_json::from_str(r#"{"request_limit": 2}"#).unwrap();
        assert_eq!(config.request_limit, 2);
        assert_eq!(config.wrong_attempt_limit, 5);
    }
}
