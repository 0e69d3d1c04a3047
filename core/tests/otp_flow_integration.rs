//! Integration tests for the OTP-gated account flows through the public API

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use jt_core::errors::{DomainError, OtpError};
    use jt_core::repositories::{MockUserRepository, UserRepository};
    use jt_core::services::{
        AuthService, AuthServiceConfig, KeyValueStore, LoginRequest, NotifyError, OtpNotifier,
        RegisterRequest, StoreError, TokenService,
    };
    use jt_core::OtpGuard;
    use jt_shared::config::{JwtConfig, OtpPolicyConfig};

    // In-memory store; TTLs are recorded but never elapse
    #[derive(Default)]
    struct FakeStore {
        entries: Mutex<HashMap<String, (String, Option<u64>)>>,
    }

    #[async_trait]
    impl KeyValueStore for FakeStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone()))
        }

        async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), StoreError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), Some(ttl_seconds)));
            Ok(())
        }

        async fn incr(&self, key: &str) -> Result<i64, StoreError> {
            let mut entries = self.entries.lock().unwrap();
            let entry = entries.entry(key.to_string()).or_insert(("0".to_string(), None));
            let next = entry
                .0
                .parse::<i64>()
                .map_err(|e| StoreError(e.to_string()))?
                + 1;
            entry.0 = next.to_string();
            Ok(next)
        }

        async fn ttl(&self, key: &str) -> Result<Option<u64>, StoreError> {
            Ok(self.entries.lock().unwrap().get(key).and_then(|(_, ttl)| *ttl))
        }

        async fn delete(&self, key: &str) -> Result<(), StoreError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    // Inbox keeping the last code sent to each address
    #[derive(Default)]
    struct Inbox {
        codes: Mutex<HashMap<String, String>>,
    }

    impl Inbox {
        fn code_for(&self, email: &str) -> String {
            self.codes
                .lock()
                .unwrap()
                .get(email)
                .cloned()
                .expect("no code delivered")
        }
    }

    #[async_trait]
    impl OtpNotifier for Inbox {
        async fn send_otp(&self, email: &str, code: &str) -> Result<(), NotifyError> {
            self.codes
                .lock()
                .unwrap()
                .insert(email.to_string(), code.to_string());
            Ok(())
        }
    }

    struct Flow {
        auth: AuthService<MockUserRepository, FakeStore, Inbox>,
        users: Arc<MockUserRepository>,
        inbox: Arc<Inbox>,
        tokens: Arc<TokenService>,
    }

    fn flow() -> Flow {
        let users = Arc::new(MockUserRepository::new());
        let inbox = Arc::new(Inbox::default());
        let guard = OtpGuard::new(
            Arc::new(FakeStore::default()),
            inbox.clone(),
            users.clone(),
            OtpPolicyConfig::default(),
        );
        let tokens = Arc::new(TokenService::new(JwtConfig::new("integration-test-secret")));
        let auth = AuthService::new(
            users.clone(),
            guard,
            tokens.clone(),
            AuthServiceConfig::default().with_password_hash_cost(4),
        );
        Flow {
            auth,
            users,
            inbox,
            tokens,
        }
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "s3cret-passw0rd".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_end_to_end() {
        let flow = flow();
        let email = "grace@example.com";

        let issued = flow
            .auth
            .register(register_request("  Grace@Example.com "))
            .await
            .unwrap();
        assert_eq!(
            issued.attempts_remaining,
            OtpPolicyConfig::default().request_limit - 1
        );

        let session = flow
            .auth
            .verify_otp(email, "register", &flow.inbox.code_for(email))
            .await
            .unwrap();
        assert!(session.user.is_active);
        let claims = flow
            .tokens
            .verify_access_token(&session.access_token.access_token)
            .unwrap();
        assert_eq!(claims.email, email);

        flow.auth
            .login(LoginRequest {
                email: email.to_string(),
                password: "s3cret-passw0rd".to_string(),
            })
            .await
            .unwrap();
        let session = flow
            .auth
            .verify_otp(email, "LOGIN", &flow.inbox.code_for(email))
            .await
            .unwrap();
        assert_eq!(session.user.email, email);
    }

    #[tokio::test]
    async fn test_wrong_codes_lock_the_module() {
        let flow = flow();
        let email = "locked@example.com";
        flow.auth.register(register_request(email)).await.unwrap();

        let limit = OtpPolicyConfig::default().wrong_attempt_limit;
        for _ in 1..limit {
            let err = flow
                .auth
                .verify_otp(email, "register", "not-a-code")
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Otp(OtpError::InvalidOtp)));
        }

        let err = flow
            .auth
            .verify_otp(email, "register", "not-a-code")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Otp(OtpError::TooManyWrongAttempts { .. })
        ));

        // The right code no longer helps while the block is in place
        let err = flow
            .auth
            .verify_otp(email, "register", &flow.inbox.code_for(email))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Otp(OtpError::AccountBlocked { .. })
        ));

        let user = flow.users.find_by_email(email).await.unwrap().unwrap();
        assert!(!user.is_active);
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let flow = flow();
        let email = "reset@example.com";
        flow.auth.register(register_request(email)).await.unwrap();
        flow.auth
            .verify_otp(email, "register", &flow.inbox.code_for(email))
            .await
            .unwrap();

        flow.auth.forget_password(email).await.unwrap();
        flow.auth
            .reset_password(email, &flow.inbox.code_for(email), "brand-new-password")
            .await
            .unwrap();

        let err = flow
            .auth
            .login(LoginRequest {
                email: email.to_string(),
                password: "s3cret-passw0rd".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");

        flow.auth
            .login(LoginRequest {
                email: email.to_string(),
                password: "brand-new-password".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_module_is_rejected() {
        let flow = flow();
        let err = flow
            .auth
            .verify_otp("anyone@example.com", "signup", "123456")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Otp(OtpError::InvalidModule { .. })
        ));
    }
}
