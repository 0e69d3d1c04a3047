//! Mock Email Service Implementation
//!
//! Logs OTP emails instead of sending them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use jt_core::services::otp::{NotifyError, OtpNotifier};
use jt_shared::utils::email::mask_email;

/// Mock email service for development and testing
///
/// This implementation:
/// - Logs each OTP email with a masked recipient
/// - Tracks message count and the last code per recipient for tests
/// - Can simulate delivery failures
#[derive(Clone, Default)]
pub struct MockEmailService {
    /// Counter for tracking number of emails sent
    message_count: Arc<AtomicU64>,
    /// Last (recipient, code) pair delivered
    last_message: Arc<Mutex<Option<(String, String)>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails every delivery
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Get the total number of emails sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Last code delivered to `email`, if the last email went there
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        let last = self.last_message.lock().ok()?;
        last.as_ref()
            .filter(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl OtpNotifier for MockEmailService {
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), NotifyError> {
        if self.simulate_failure {
            warn!(
                provider = "mock",
                email = %mask_email(email),
                "Mock email service simulating failure"
            );
            return Err(NotifyError("Simulated email sending failure".to_string()));
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut last) = self.last_message.lock() {
            *last = Some((email.to_string(), code.to_string()));
        }

        info!(
            target: "email_service",
            provider = "mock",
            email = %mask_email(email),
            message_number = count,
            "OTP email sent (mock)"
        );
        Ok(())
    }
}
