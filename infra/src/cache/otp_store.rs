//! Redis-backed key-value store for the OTP guard

use async_trait::async_trait;

use jt_core::services::otp::{KeyValueStore, StoreError};

use super::RedisClient;
use crate::InfrastructureError;

/// `KeyValueStore` adapter over [`RedisClient`]
///
/// Errors are flattened into [`StoreError`]; the guard decides how to fail.
#[derive(Clone)]
pub struct RedisOtpStore {
    client: RedisClient,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

fn to_store_error(err: InfrastructureError) -> StoreError {
    StoreError(err.to_string())
}

#[async_trait]
impl KeyValueStore for RedisOtpStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.client.get(key).await.map_err(to_store_error)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        self.client
            .set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(to_store_error)
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        self.client.increment(key).await.map_err(to_store_error)
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, StoreError> {
        self.client.ttl(key).await.map_err(to_store_error)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client.delete(key).await.map(|_| ()).map_err(to_store_error)
    }
}
