//! Main authentication service implementation

use std::sync::Arc;

use jt_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::user::User;
use crate::domain::entities::OtpModule;
use crate::errors::{AuthError, DomainError, DomainResult, OtpError};
use crate::repositories::UserRepository;
use crate::services::otp::{KeyValueStore, OtpGuard, OtpIssued, OtpNotifier};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::types::{LoginRequest, RegisterRequest, VerifiedSession};

/// Authentication service for the OTP-gated account flows
pub struct AuthService<R, S, N>
where
    R: UserRepository,
    S: KeyValueStore + ?Sized,
    N: OtpNotifier + ?Sized,
{
    /// User repository for account persistence
    user_repository: Arc<R>,
    /// Guard issuing and verifying codes
    otp_guard: OtpGuard<S, N, R>,
    /// Token service for access tokens
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<R, S, N> AuthService<R, S, N>
where
    R: UserRepository,
    S: KeyValueStore + ?Sized,
    N: OtpNotifier + ?Sized,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for account persistence
    /// * `otp_guard` - Guard built over the same repository
    /// * `token_service` - Service for access tokens
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<R>,
        otp_guard: OtpGuard<S, N, R>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            otp_guard,
            token_service,
            config,
        }
    }

    pub fn otp_guard(&self) -> &OtpGuard<S, N, R> {
        &self.otp_guard
    }

    /// Register a pending account and send a registration code
    ///
    /// An inactive account under the same email is reused, so an abandoned
    /// registration can be finished later.
    ///
    /// # Returns
    ///
    /// * `Ok(OtpIssued)` - Account pending, code sent
    /// * `Err(DomainError)` - Invalid input, `UserAlreadyExists`, or a guard error
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<OtpIssued> {
        let email = self.validated_email(&request.email)?;
        self.validate_password(&request.password)?;

        match self.user_repository.find_by_email(&email).await? {
            Some(user) if user.is_active => {
                return Err(AuthError::UserAlreadyExists.into());
            }
            Some(_) => {
                tracing::debug!(
                    email = %mask_email(&email),
                    event = "registration_resumed",
                    "Pending account already exists"
                );
            }
            None => {
                let password_hash = self.hash_password(request.password).await?;
                let user = User::new_pending(
                    email.clone(),
                    password_hash,
                    request.first_name.trim().to_string(),
                    request.last_name.trim().to_string(),
                );
                self.user_repository.create(user).await?;
                tracing::info!(
                    email = %mask_email(&email),
                    event = "user_registered",
                    "Pending account created"
                );
            }
        }

        self.otp_guard.request_otp(&email, OtpModule::Register).await
    }

    /// Check credentials and send a login code
    ///
    /// A blocked login module is only reported once the password and account
    /// state check out.
    pub async fn login(&self, request: LoginRequest) -> DomainResult<OtpIssued> {
        let email = normalize_email(&request.email);

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(request.password, &user.password_hash).await? {
            tracing::warn!(
                email = %mask_email(&email),
                event = "login_bad_password",
                "Login attempt with wrong password"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            return Err(OtpError::AccountInactive.into());
        }

        self.otp_guard.request_otp(&email, OtpModule::Login).await
    }

    /// Send a password recovery code
    pub async fn forget_password(&self, email: &str) -> DomainResult<OtpIssued> {
        let email = normalize_email(email);
        if self.user_repository.find_by_email(&email).await?.is_none() {
            return Err(AuthError::UserNotFound.into());
        }

        self.otp_guard
            .request_otp(&email, OtpModule::ForgetPassword)
            .await
    }

    /// Issue a fresh code for `module`
    ///
    /// `register` needs a pending account; the other modules need an active one.
    pub async fn resend_otp(&self, email: &str, module: &str) -> DomainResult<OtpIssued> {
        let module: OtpModule = module.parse()?;
        let email = normalize_email(email);

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        match module {
            OtpModule::Register if user.is_active => {
                return Err(AuthError::UserAlreadyExists.into());
            }
            OtpModule::Login | OtpModule::ForgetPassword if !user.is_active => {
                return Err(OtpError::AccountInactive.into());
            }
            _ => {}
        }

        self.otp_guard.request_otp(&email, module).await
    }

    /// Verify a code and open a session
    ///
    /// The submitted code is compared as given, without trimming.
    pub async fn verify_otp(
        &self,
        email: &str,
        module: &str,
        code: &str,
    ) -> DomainResult<VerifiedSession> {
        let module: OtpModule = module.parse()?;
        let email = normalize_email(email);

        self.otp_guard.verify_otp(&email, module, code).await?;

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let access_token = self.token_service.issue_access_token(&user)?;

        tracing::info!(
            user_id = %user.id,
            module = %module,
            event = "session_issued",
            "Session issued after OTP verification"
        );

        Ok(VerifiedSession { user, access_token })
    }

    /// Replace the password after verifying a forget-password code
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let email = normalize_email(email);
        self.validate_password(new_password)?;

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !user.is_active {
            return Err(OtpError::AccountInactive.into());
        }

        self.otp_guard
            .verify_otp(&email, OtpModule::ForgetPassword, code)
            .await?;

        let password_hash = self.hash_password(new_password.to_string()).await?;
        self.user_repository
            .update_password_hash(&email, &password_hash)
            .await?;

        tracing::info!(
            user_id = %user.id,
            event = "password_reset",
            "Password reset completed"
        );
        Ok(())
    }

    fn validated_email(&self, email: &str) -> DomainResult<String> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: "Invalid email address".to_string(),
            });
        }
        Ok(email)
    }

    fn validate_password(&self, password: &str) -> DomainResult<()> {
        if password.chars().count() < self.config.min_password_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }
        Ok(())
    }

    async fn hash_password(&self, password: String) -> DomainResult<String> {
        let cost = self.config.password_hash_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })
    }

    async fn verify_password(&self, password: String, hash: &str) -> DomainResult<bool> {
        let hash = hash.to_string();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?;
        // A malformed stored hash is treated as a mismatch
        Ok(verified.unwrap_or(false))
    }
}
