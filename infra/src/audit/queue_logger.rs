//! Queue-backed audit logger.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use sg_core::services::sms::{AuditLogger, SendRecord};

use super::store::AuditStore;

/// `AuditLogger` implementation backed by a bounded channel and a spawned
/// worker task draining into an `AuditStore`.
///
/// `log` never blocks: when the queue is full or the worker has shut
/// down, the record is dropped with a warning. Store failures stay inside
/// the worker.
pub struct QueueAuditLogger {
    tx: mpsc::Sender<SendRecord>,
}

impl QueueAuditLogger {
    /// Spawns the worker on the current Tokio runtime.
    pub fn spawn(store: Arc<dyn AuditStore>, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<SendRecord>(capacity);

        tokio::spawn(async move {
            while let Some(record) = rx.recv().await {
                if let Err(err) = store.record(&record).await {
                    warn!(
                        error = %err,
                        mobile = %record.code.full_number(),
                        "Failed to persist send record"
                    );
                }
            }
        });

        Self { tx }
    }
}

impl AuditLogger for QueueAuditLogger {
    fn log(&self, record: SendRecord) {
        if let Err(err) = self.tx.try_send(record) {
            warn!(error = %err, "Send record dropped, audit queue unavailable");
        }
    }
}
