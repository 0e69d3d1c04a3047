//! Store key layout for OTP guard state.

use crate::domain::entities::OtpModule;

/// Value stored under every block key
pub const BLOCKED_SENTINEL: &str = "blocked";

/// Every store key the guard owns for one `(email, module)` pair
///
/// The wrong-attempt key puts the email before the module; existing
/// deployments already hold keys in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpKeys {
    /// `otp:{module}:{email}`
    pub otp: String,
    /// `otp_limit:{module}:{email}`
    pub request_count: String,
    /// `wrong_otp_attempts:{email}:{module}`
    pub wrong_attempts: String,
    /// `blocked_user:{module}:{email}`
    pub block: String,
    /// `blocked_user:{email}`, account-wide and never set by the guard
    pub account_block: String,
}

impl OtpKeys {
    pub fn new(email: &str, module: OtpModule) -> Self {
        let module = module.as_str();
        Self {
            otp: format!("otp:{}:{}", module, email),
            request_count: format!("otp_limit:{}:{}", module, email),
            wrong_attempts: format!("wrong_otp_attempts:{}:{}", email, module),
            block: format!("blocked_user:{}:{}", module, email),
            account_block: format!("blocked_user:{}", email),
        }
    }

    /// Keys removed by a successful verification or an administrative reset
    pub fn cleared_on_success(&self) -> [&str; 5] {
        [
            &self.wrong_attempts,
            &self.otp,
            &self.request_count,
            &self.block,
            &self.account_block,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let keys = OtpKeys::new("a@x.com", OtpModule::ForgetPassword);
        assert_eq!(keys.otp, "otp:forgetpassword:a@x.com");
        assert_eq!(keys.request_count, "otp_limit:forgetpassword:a@x.com");
        assert_eq!(keys.wrong_attempts, "wrong_otp_attempts:a@x.com:forgetpassword");
        assert_eq!(keys.block, "blocked_user:forgetpassword:a@x.com");
        assert_eq!(keys.account_block, "blocked_user:a@x.com");
    }

    #[test]
    fn test_cleared_on_success_covers_every_key() {
        let keys = OtpKeys::new("b@x.com", OtpModule::Login);
        let cleared = keys.cleared_on_success();
        assert_eq!(cleared.len(), 5);
        assert!(cleared.contains(&keys.account_block.as_str()));
        assert!(cleared.contains(&keys.wrong_attempts.as_str()));
    }
}
