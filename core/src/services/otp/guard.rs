//! OTP guard implementation

use std::sync::Arc;

use jt_shared::config::OtpPolicyConfig;
use jt_shared::utils::email::mask_email;

use crate::domain::entities::{OtpCode, OtpModule};
use crate::domain::value_objects::{BlockDuration, OtpKeys, RemainingTime, BLOCKED_SENTINEL};
use crate::errors::{DomainError, DomainResult, OtpError};

use super::traits::{AccountDirectory, KeyValueStore, OtpNotifier, StoreError};
use super::types::{OtpIssued, OtpVerified};

/// Rate-limiting and lockout state machine in front of every OTP flow
///
/// All state lives in the injected [`KeyValueStore`]; the guard itself holds
/// no per-user data and is cheap to clone.
///
/// Counter checks and writes are separate round-trips, so two concurrent
/// requests can both pass the limit check and overshoot the counter by one.
/// The limit is therefore soft.
pub struct OtpGuard<S, N, A>
where
    S: KeyValueStore + ?Sized,
    N: OtpNotifier + ?Sized,
    A: AccountDirectory + ?Sized,
{
    /// Store holding codes, counters and block flags
    store: Arc<S>,
    /// Delivery channel for issued codes
    notifier: Arc<N>,
    /// Account state for post-verification checks
    accounts: Arc<A>,
    /// Limits, TTLs and block durations
    config: OtpPolicyConfig,
}

impl<S, N, A> Clone for OtpGuard<S, N, A>
where
    S: KeyValueStore + ?Sized,
    N: OtpNotifier + ?Sized,
    A: AccountDirectory + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
            accounts: Arc::clone(&self.accounts),
            config: self.config.clone(),
        }
    }
}

impl<S, N, A> OtpGuard<S, N, A>
where
    S: KeyValueStore + ?Sized,
    N: OtpNotifier + ?Sized,
    A: AccountDirectory + ?Sized,
{
    /// Create a new guard
    ///
    /// # Arguments
    ///
    /// * `store` - Key-value store with expiring keys
    /// * `notifier` - Delivery channel for issued codes
    /// * `accounts` - Account state collaborator
    /// * `config` - OTP policy
    pub fn new(store: Arc<S>, notifier: Arc<N>, accounts: Arc<A>, config: OtpPolicyConfig) -> Self {
        Self {
            store,
            notifier,
            accounts,
            config,
        }
    }

    pub fn config(&self) -> &OtpPolicyConfig {
        &self.config
    }

    /// Issue a new code for `(email, module)`
    ///
    /// This method:
    /// 1. Refuses while the module block flag is present
    /// 2. Blocks the module once the request counter reached the limit
    /// 3. Stores a fresh code, overwriting any previous one
    /// 4. Bumps the request counter and dispatches the code
    ///
    /// Delivery failures are logged and do not invalidate the stored code.
    ///
    /// # Returns
    ///
    /// * `Ok(OtpIssued)` - Code stored; carries the advisory remaining quota
    /// * `Err(DomainError::Otp(_))` - `AccountBlocked`, `RateLimitExceeded` or `StoreUnavailable`
    pub async fn request_otp(&self, email: &str, module: OtpModule) -> DomainResult<OtpIssued> {
        let keys = OtpKeys::new(email, module);

        if let Some(remaining) = self.block_remaining(&keys.block).await? {
            tracing::warn!(
                email = %mask_email(email),
                module = %module,
                remaining_seconds = remaining.seconds(),
                event = "otp_request_blocked",
                "OTP request refused while module is blocked"
            );
            return Err(OtpError::AccountBlocked { remaining }.into());
        }

        let count = self.read_counter(&keys.request_count).await?;
        let limit = u64::from(self.config.request_limit);
        if count >= limit {
            let block = BlockDuration(self.request_block_seconds(module));
            self.store
                .set_ex(&keys.block, BLOCKED_SENTINEL, block.seconds())
                .await
                .map_err(|e| store_unavailable("set_ex", e))?;

            if module == OtpModule::Register {
                self.delete_key(&keys.otp).await?;
                self.delete_key(&keys.request_count).await?;
            }

            tracing::warn!(
                email = %mask_email(email),
                module = %module,
                block_seconds = block.seconds(),
                event = "otp_rate_limit_block",
                "OTP request limit reached, module blocked"
            );
            return Err(OtpError::RateLimitExceeded { module, block }.into());
        }

        let code = OtpCode::generate(self.config.code_length);
        self.store
            .set_ex(&keys.otp, code.as_str(), self.config.code_ttl_seconds)
            .await
            .map_err(|e| store_unavailable("set_ex", e))?;
        self.bump_counter(&keys.request_count, self.config.request_window_seconds)
            .await?;

        if let Err(e) = self.notifier.send_otp(email, code.as_str()).await {
            tracing::warn!(
                email = %mask_email(email),
                module = %module,
                error = %e,
                event = "otp_delivery_failed",
                "OTP stored but delivery failed"
            );
        }

        let attempts_remaining = limit.saturating_sub(count + 1) as u32;
        tracing::info!(
            email = %mask_email(email),
            module = %module,
            attempts_remaining = attempts_remaining,
            event = "otp_issued",
            "OTP issued"
        );

        Ok(OtpIssued {
            module,
            message: format!(
                "OTP sent to {}. It expires in {} minutes",
                email,
                self.config.code_ttl_minutes()
            ),
            attempts_remaining,
            expires_in_seconds: self.config.code_ttl_seconds,
        })
    }

    /// Verify a submitted code for `(email, module)`
    ///
    /// A missing or mismatching code counts as a wrong attempt; reaching the
    /// wrong-attempt limit blocks the module. On success every key the guard
    /// owns for the pair is cleared before the module post-action runs:
    /// `register` activates the account, other modules require it to be active.
    ///
    /// # Returns
    ///
    /// * `Ok(OtpVerified)` - Code accepted; the caller may issue a session
    /// * `Err(DomainError::Otp(_))` - `AccountBlocked`, `InvalidOtp`,
    ///   `TooManyWrongAttempts`, `AccountInactive` or `StoreUnavailable`
    pub async fn verify_otp(
        &self,
        email: &str,
        module: OtpModule,
        code: &str,
    ) -> DomainResult<OtpVerified> {
        let keys = OtpKeys::new(email, module);

        for block_key in [&keys.block, &keys.account_block] {
            if let Some(remaining) = self.block_remaining(block_key).await? {
                tracing::warn!(
                    email = %mask_email(email),
                    module = %module,
                    remaining_seconds = remaining.seconds(),
                    event = "otp_verify_blocked",
                    "OTP verification refused while blocked"
                );
                return Err(OtpError::AccountBlocked { remaining }.into());
            }
        }

        let stored = self
            .store
            .get(&keys.otp)
            .await
            .map_err(|e| store_unavailable("get", e))?
            .map(OtpCode::from_stored);
        let matched = stored.map_or(false, |stored| stored.matches(code));

        if !matched {
            return Err(self.record_wrong_attempt(email, module, &keys).await);
        }

        self.clear_keys(&keys).await?;

        if module.activates_account() {
            self.accounts.activate(email).await?;
        } else if !self.accounts.is_active(email).await? {
            tracing::warn!(
                email = %mask_email(email),
                module = %module,
                event = "otp_verified_inactive_account",
                "OTP accepted for a deactivated account"
            );
            return Err(OtpError::AccountInactive.into());
        }

        tracing::info!(
            email = %mask_email(email),
            module = %module,
            event = "otp_verified",
            "OTP verified"
        );

        Ok(OtpVerified {
            email: email.to_string(),
            module,
        })
    }

    /// Remaining block time for `(email, module)`, `None` when not blocked
    pub async fn block_status(
        &self,
        email: &str,
        module: OtpModule,
    ) -> DomainResult<Option<RemainingTime>> {
        let keys = OtpKeys::new(email, module);
        self.block_remaining(&keys.block).await
    }

    /// Requests left before the module is blocked (advisory)
    pub async fn remaining_requests(&self, email: &str, module: OtpModule) -> DomainResult<u32> {
        let keys = OtpKeys::new(email, module);
        let count = self.read_counter(&keys.request_count).await?;
        Ok(u64::from(self.config.request_limit).saturating_sub(count) as u32)
    }

    /// Seconds until the request counter window resets, `0` when no window is open
    pub async fn request_window_remaining(
        &self,
        email: &str,
        module: OtpModule,
    ) -> DomainResult<u64> {
        let keys = OtpKeys::new(email, module);
        let ttl = self
            .store
            .ttl(&keys.request_count)
            .await
            .map_err(|e| store_unavailable("ttl", e))?;
        Ok(ttl.unwrap_or(0))
    }

    /// Administrative reset: clears codes, counters and blocks for the pair
    pub async fn reset(&self, email: &str, module: OtpModule) -> DomainResult<()> {
        let keys = OtpKeys::new(email, module);
        self.clear_keys(&keys).await?;
        tracing::info!(
            email = %mask_email(email),
            module = %module,
            event = "otp_state_reset",
            "OTP state reset"
        );
        Ok(())
    }

    /// Bump the wrong-attempt counter and build the error to return
    async fn record_wrong_attempt(
        &self,
        email: &str,
        module: OtpModule,
        keys: &OtpKeys,
    ) -> DomainError {
        let attempts = match self
            .bump_counter(&keys.wrong_attempts, self.config.wrong_attempt_window_seconds)
            .await
        {
            Ok(attempts) => attempts,
            Err(e) => return e,
        };

        if attempts < u64::from(self.config.wrong_attempt_limit) {
            tracing::info!(
                email = %mask_email(email),
                module = %module,
                event = "otp_invalid",
                "Invalid OTP submitted"
            );
            return OtpError::InvalidOtp.into();
        }

        let block = BlockDuration(self.config.wrong_attempt_block_seconds);
        if let Err(e) = self
            .store
            .set_ex(&keys.block, BLOCKED_SENTINEL, block.seconds())
            .await
        {
            return store_unavailable("set_ex", e);
        }
        if let Err(e) = self.delete_key(&keys.wrong_attempts).await {
            return e;
        }

        tracing::warn!(
            email = %mask_email(email),
            module = %module,
            block_seconds = block.seconds(),
            event = "otp_wrong_attempt_block",
            "Too many wrong OTP attempts, module blocked"
        );
        OtpError::TooManyWrongAttempts { block }.into()
    }

    fn request_block_seconds(&self, module: OtpModule) -> u64 {
        match module {
            OtpModule::Register => self.config.register_block_seconds,
            OtpModule::Login | OtpModule::ForgetPassword => self.config.request_block_seconds,
        }
    }

    async fn block_remaining(&self, key: &str) -> DomainResult<Option<RemainingTime>> {
        let present = self
            .store
            .get(key)
            .await
            .map_err(|e| store_unavailable("get", e))?
            .is_some();
        if !present {
            return Ok(None);
        }

        // A flag without expiry still blocks; report zero remaining time.
        let ttl = self
            .store
            .ttl(key)
            .await
            .map_err(|e| store_unavailable("ttl", e))?;
        Ok(Some(RemainingTime(ttl.unwrap_or(0))))
    }

    async fn read_counter(&self, key: &str) -> DomainResult<u64> {
        let value = self
            .store
            .get(key)
            .await
            .map_err(|e| store_unavailable("get", e))?;
        match value {
            None => Ok(0),
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                tracing::error!(
                    key = key,
                    event = "otp_counter_corrupt",
                    "Counter value is not an integer"
                );
                DomainError::from(OtpError::StoreUnavailable)
            }),
        }
    }

    /// Set the counter to 1 with `window_seconds` TTL when absent, else increment it
    async fn bump_counter(&self, key: &str, window_seconds: u64) -> DomainResult<u64> {
        if self.read_counter(key).await? == 0 {
            self.store
                .set_ex(key, "1", window_seconds)
                .await
                .map_err(|e| store_unavailable("set_ex", e))?;
            return Ok(1);
        }

        let value = self
            .store
            .incr(key)
            .await
            .map_err(|e| store_unavailable("incr", e))?;
        Ok(value.max(0) as u64)
    }

    async fn delete_key(&self, key: &str) -> DomainResult<()> {
        self.store
            .delete(key)
            .await
            .map_err(|e| store_unavailable("delete", e))
    }

    async fn clear_keys(&self, keys: &OtpKeys) -> DomainResult<()> {
        for key in keys.cleared_on_success() {
            self.delete_key(key).await?;
        }
        Ok(())
    }
}

/// Log a store failure and fail closed
fn store_unavailable(operation: &'static str, err: StoreError) -> DomainError {
    tracing::error!(
        operation = operation,
        error = %err,
        event = "otp_store_unavailable",
        "Key-value store operation failed"
    );
    OtpError::StoreUnavailable.into()
}
