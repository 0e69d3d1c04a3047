//! Tests for the mock email service and provider selection

use jt_core::services::otp::OtpNotifier;
use jt_shared::config::{EmailConfig, EmailProvider};
use tokio_test::{assert_err, assert_ok};

use crate::email::{create_email_service, render_otp_body, MockEmailService};

#[tokio::test]
async fn test_mock_email_send_success() {
    let service = MockEmailService::new();
    assert_ok!(service.send_otp("a@x.com", "123456").await);

    assert_eq!(service.get_message_count(), 1);
    assert_eq!(service.last_code_for("a@x.com").as_deref(), Some("123456"));
    assert_eq!(service.last_code_for("b@x.com"), None);
}

#[tokio::test]
async fn test_mock_email_simulated_failure() {
    let service = MockEmailService::failing();
    assert_err!(service.send_otp("a@x.com", "123456").await);
    assert_eq!(service.get_message_count(), 0);
}

#[tokio::test]
async fn test_create_mock_provider() {
    let service = create_email_service(&EmailConfig::default(), 5).unwrap();
    assert_ok!(service.send_otp("a@x.com", "654321").await);
}

#[test]
fn test_create_brevo_without_key_fails() {
    let config = EmailConfig {
        provider: EmailProvider::Brevo,
        ..EmailConfig::default()
    };
    assert!(create_email_service(&config, 5).is_err());
}

#[test]
fn test_otp_body_contains_code_and_expiry() {
    let body = render_otp_body("007007", 5);
    assert!(body.contains("007007"));
    assert!(body.contains("5 minutes"));
}
