//! Email Service Module
//!
//! Delivers OTP codes by email. Providers implement the core `OtpNotifier`
//! trait:
//!
//! - **Brevo**: transactional email HTTP API
//! - **Mock**: logs instead of sending, for development and tests

use std::sync::Arc;

use jt_core::services::otp::OtpNotifier;
use jt_shared::config::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub mod brevo;
pub mod mock_email;

#[cfg(test)]
mod tests;

pub use brevo::BrevoEmailService;
pub use mock_email::MockEmailService;

/// Subject line of OTP emails
pub const OTP_EMAIL_SUBJECT: &str = "Your Job Tracker verification code";

/// Create the email service selected by `config.provider`
///
/// `code_ttl_minutes` is quoted in the email body.
///
/// A misconfigured Brevo provider is an error rather than a silent fallback
/// to the mock, so codes are never logged instead of sent in production.
pub fn create_email_service(
    config: &EmailConfig,
    code_ttl_minutes: u64,
) -> Result<Arc<dyn OtpNotifier>, InfrastructureError> {
    match config.provider {
        EmailProvider::Brevo => {
            let service =
                BrevoEmailService::new(config.clone())?.with_code_ttl_minutes(code_ttl_minutes);
            Ok(Arc::new(service))
        }
        EmailProvider::Mock => {
            tracing::warn!("Using mock email service; OTP codes will only be logged");
            Ok(Arc::new(MockEmailService::new()))
        }
    }
}

/// Plain HTML body carrying the code
pub(crate) fn render_otp_body(code: &str, ttl_minutes: u64) -> String {
    format!(
        "<p>Your verification code is <strong>{}</strong>.</p>\
         <p>It expires in {} minutes. If you did not request it, ignore this email.</p>",
        code, ttl_minutes
    )
}
