//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Access token (JWT) configuration
//! - `cache` - Redis connection configuration
//! - `database` - Database connection and pool configuration
//! - `email` - OTP email delivery configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - OTP rate limits, lockout thresholds and TTLs

pub mod auth;
pub mod cache;
pub mod database;
pub mod email;
pub mod environment;
pub mod otp;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpPolicyConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Redis configuration
    pub cache: CacheConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// OTP policy configuration
    #[serde(default)]
    pub otp: OtpPolicyConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Access token configuration
    pub jwt: JwtConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            cache: CacheConfig::default(),
            database: DatabaseConfig::default(),
            otp: OtpPolicyConfig::default(),
            email: EmailConfig::default(),
            jwt: JwtConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// Every section falls back to its defaults when its variables are unset.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            cache: CacheConfig::from_env(),
            database: DatabaseConfig::from_env(),
            otp: OtpPolicyConfig::from_env(),
            email: EmailConfig::from_env(),
            jwt: JwtConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is unset or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
