//! In-memory code store for tests and development.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use sg_core::errors::StorageError;
use sg_core::services::sms::{Clock, CodeStorage};
use sg_core::Code;

struct StoredEntry {
    code: Code,
    expires_at: DateTime<Utc>,
}

/// Process-local store with clock-driven passive expiry.
///
/// Takes its time source as a dependency so tests can step entries past
/// their TTL without sleeping.
pub struct MemoryStorage {
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, StoredEntry>>,
}

impl MemoryStorage {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .lock()
            .unwrap()
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CodeStorage for MemoryStorage {
    async fn set(&self, key: &str, code: &Code, ttl: Duration) -> Result<(), StorageError> {
        let entry = StoredEntry {
            code: code.clone(),
            expires_at: self.clock.now() + ttl,
        };
        self.entries.lock().unwrap().insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Code>, StorageError> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > self.clock.now() => Ok(Some(entry.code.clone())),
            Some(_) => {
                // Lazily prune the expired entry
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn forget(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
