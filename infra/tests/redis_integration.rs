//! Redis client integration tests
//!
//! Require a running Redis server (`REDIS_URL`, default `redis://localhost:6379`).
//! Run with `cargo test -p jt_infra -- --ignored`.

use jt_infra::cache::{CacheConfig, RedisClient};
use uuid::Uuid;

async fn client() -> RedisClient {
    RedisClient::new(CacheConfig::from_env().with_prefix("jt_test"))
        .await
        .expect("Redis must be running for integration tests")
}

fn unique_key(name: &str) -> String {
    format!("{}:{}", name, Uuid::new_v4())
}

#[tokio::test]
#[ignore]
async fn test_set_get_delete() {
    let client = client().await;
    let key = unique_key("set_get");

    client.set_with_expiry(&key, "123456", 60).await.unwrap();
    assert_eq!(client.get(&key).await.unwrap().as_deref(), Some("123456"));

    let ttl = client.ttl(&key).await.unwrap().unwrap();
    assert!(ttl > 0 && ttl <= 60);

    assert!(client.delete(&key).await.unwrap());
    assert!(!client.delete(&key).await.unwrap());
    assert_eq!(client.get(&key).await.unwrap(), None);
    assert_eq!(client.ttl(&key).await.unwrap(), None);
}

#[tokio::test]
#[ignore]
async fn test_increment_keeps_ttl() {
    let client = client().await;
    let key = unique_key("counter");

    client.set_with_expiry(&key, "1", 120).await.unwrap();
    assert_eq!(client.increment(&key).await.unwrap(), 2);
    assert_eq!(client.increment(&key).await.unwrap(), 3);

    let ttl = client.ttl(&key).await.unwrap().unwrap();
    assert!(ttl > 100);

    client.delete(&key).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = client().await;
    assert!(client.health_check().await.unwrap());
}
