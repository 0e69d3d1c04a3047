//! Email delivery configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Email provider used to deliver OTP codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Brevo transactional email HTTP API
    Brevo,
    /// Log-only provider for development and tests
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brevo" => Ok(EmailProvider::Brevo),
            "mock" | "console" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Which provider to use
    pub provider: EmailProvider,

    /// Provider API key
    #[serde(default)]
    pub api_key: String,

    /// Provider API endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Sender address
    pub from_email: String,

    /// Sender display name
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Timeout for provider requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            api_key: String::new(),
            api_url: default_api_url(),
            from_email: String::from("no-reply@jobtracker.local"),
            sender_name: default_sender_name(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env_or("EMAIL_PROVIDER", defaults.provider),
            api_key: std::env::var("BREVO_API_KEY").unwrap_or_default(),
            api_url: std::env::var("BREVO_API_URL").unwrap_or(defaults.api_url),
            from_email: std::env::var("FROM_EMAIL").unwrap_or(defaults.from_email),
            sender_name: std::env::var("EMAIL_SENDER_NAME").unwrap_or(defaults.sender_name),
            request_timeout_secs: env_or("EMAIL_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
        }
    }
}

fn default_api_url() -> String {
    String::from("https://api.brevo.com/v3/smtp/email")
}

fn default_sender_name() -> String {
    String::from("Job Tracker")
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_provider_from_str() {
        assert_eq!("brevo".parse::<EmailProvider>().unwrap(), EmailProvider::Brevo);
        assert_eq!("MOCK".parse::<EmailProvider>().unwrap(), EmailProvider::Mock);
        assert!("smtp".parse::<EmailProvider>().is_err());
    }

    #[test]
    fn test_email_config_default() {
        let config = EmailConfig::default();
        assert_eq!(config.provider, EmailProvider::Mock);
        assert_eq!(config.api_url, "https://api.brevo.com/v3/smtp/email");
        assert_eq!(config.sender_name, "Job Tracker");
    }
}
