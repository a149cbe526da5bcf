//! Persistence behind the audit queue.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use sg_core::services::sms::SendRecord;

use crate::InfraError;

/// Durable destination for send records, driven by the queue worker.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn record(&self, entry: &SendRecord) -> Result<(), InfraError>;
}

/// In-memory store for tests and development.
#[derive(Default)]
pub struct MemoryAuditStore {
    entries: Mutex<Vec<SendRecord>>,
}

impl MemoryAuditStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn entries(&self) -> Vec<SendRecord> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn record(&self, entry: &SendRecord) -> Result<(), InfraError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
