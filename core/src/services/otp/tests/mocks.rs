//! Mock implementations for testing the OTP guard

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::DomainResult;
use crate::services::otp::traits::{
    AccountDirectory, KeyValueStore, NotifyError, OtpNotifier, StoreError,
};

// In-memory store: key -> (value, ttl seconds). Time never advances;
// tests expire keys explicitly.
pub struct MemoryStore {
    pub entries: Arc<Mutex<HashMap<String, (String, Option<u64>)>>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn put(&self, key: &str, value: &str, ttl: Option<u64>) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl));
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone())
    }

    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).and_then(|(_, ttl)| *ttl)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    /// Simulate TTL expiry of a key
    pub fn expire(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.value(key))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        self.check()?;
        self.put(key, value, Some(ttl_seconds));
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| ("0".to_string(), None));
        let next = entry
            .0
            .parse::<i64>()
            .map_err(|_| StoreError("value is not an integer".to_string()))?
            + 1;
        entry.0 = next.to_string();
        Ok(next)
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, StoreError> {
        self.check()?;
        Ok(self.ttl_of(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

// Records every dispatched code
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub should_fail: bool,
}

impl RecordingNotifier {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn last_code(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl OtpNotifier for RecordingNotifier {
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), NotifyError> {
        if self.should_fail {
            return Err(NotifyError("email provider unreachable".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

// email -> is_active
pub struct MockAccountDirectory {
    pub accounts: Arc<Mutex<HashMap<String, bool>>>,
}

impl MockAccountDirectory {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_account(self, email: &str, is_active: bool) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), is_active);
        self
    }

    pub fn is_active_now(&self, email: &str) -> bool {
        self.accounts
            .lock()
            .unwrap()
            .get(email)
            .copied()
            .unwrap_or(false)
    }
}

#[async_trait]
impl AccountDirectory for MockAccountDirectory {
    async fn is_active(&self, email: &str) -> DomainResult<bool> {
        Ok(self.is_active_now(email))
    }

    async fn activate(&self, email: &str) -> DomainResult<()> {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), true);
        Ok(())
    }
}
