//! Cache module for Redis-backed OTP state
//!
//! Provides the Redis client and the adapter exposing it to the OTP guard
//! as a `KeyValueStore`.

pub mod otp_store;
pub mod redis_client;


pub use otp_store::RedisOtpStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use jt_shared::config::CacheConfig;
