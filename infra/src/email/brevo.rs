//! Brevo Email Service Implementation
//!
//! Sends OTP emails through the Brevo transactional email API
//! (`POST /v3/smtp/email` with an `api-key` header).

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};

use jt_core::services::otp::{NotifyError, OtpNotifier};
use jt_shared::config::EmailConfig;
use jt_shared::utils::email::mask_email;

use super::{render_otp_body, OTP_EMAIL_SUBJECT};
use crate::InfrastructureError;

/// Default code lifetime quoted in the email body
const DEFAULT_CODE_TTL_MINUTES: u64 = 5;

#[derive(Debug, Serialize)]
struct Contact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    html_content: String,
}

/// Brevo email service implementation
pub struct BrevoEmailService {
    client: Client,
    config: EmailConfig,
    code_ttl_minutes: u64,
}

impl BrevoEmailService {
    /// Create a new Brevo email service
    ///
    /// Fails with `InfrastructureError::Config` when the API key or sender
    /// address is missing.
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "BREVO_API_KEY is required for the brevo email provider".to_string(),
            ));
        }
        if config.from_email.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "FROM_EMAIL is required for the brevo email provider".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "Brevo email service initialized with sender: {}",
            mask_email(&config.from_email)
        );

        Ok(Self {
            client,
            config,
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
        })
    }

    /// Set the code lifetime quoted in the email body
    pub fn with_code_ttl_minutes(mut self, minutes: u64) -> Self {
        self.code_ttl_minutes = minutes;
        self
    }

    fn build_request<'a>(&'a self, email: &'a str, code: &str) -> SendEmailRequest<'a> {
        SendEmailRequest {
            sender: Contact {
                email: &self.config.from_email,
                name: Some(&self.config.sender_name),
            },
            to: vec![Contact { email, name: None }],
            subject: OTP_EMAIL_SUBJECT,
            html_content: render_otp_body(code, self.code_ttl_minutes),
        }
    }
}

#[async_trait]
impl OtpNotifier for BrevoEmailService {
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), NotifyError> {
        let request = self.build_request(email, code);

        let response = self
            .client
            .post(&self.config.api_url)
            .header("api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(
                    provider = "brevo",
                    email = %mask_email(email),
                    "Failed to reach Brevo: {}",
                    e
                );
                NotifyError(format!("Brevo request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                provider = "brevo",
                email = %mask_email(email),
                status = status.as_u16(),
                "Brevo rejected OTP email: {}",
                body
            );
            return Err(NotifyError(format!("Brevo returned status {}", status)));
        }

        info!(
            target: "email_service",
            provider = "brevo",
            email = %mask_email(email),
            "OTP email sent"
        );
        Ok(())
    }
}
