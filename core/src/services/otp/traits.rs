//! Collaborator seams for the OTP guard

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::DomainResult;

/// Failure reported by a key-value store adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("key-value store error: {0}")]
pub struct StoreError(pub String);

/// Failure reported by an OTP delivery channel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("notification error: {0}")]
pub struct NotifyError(pub String);

/// Key-value store with expiring keys
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a key; `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Write a key with a time-to-live, overwriting any previous value
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), StoreError>;
    /// Increment an integer key, keeping its TTL; returns the new value
    async fn incr(&self, key: &str) -> Result<i64, StoreError>;
    /// Remaining TTL in seconds; `None` when the key is absent or has no expiry
    async fn ttl(&self, key: &str) -> Result<Option<u64>, StoreError>;
    /// Remove a key; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Delivery channel for issued codes
#[async_trait]
pub trait OtpNotifier: Send + Sync {
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), NotifyError>;
}

/// Account state consulted after a successful verification
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Whether the account exists and is active
    async fn is_active(&self, email: &str) -> DomainResult<bool>;
    /// Activate the account registered under `email`
    async fn activate(&self, email: &str) -> DomainResult<()>;
}
