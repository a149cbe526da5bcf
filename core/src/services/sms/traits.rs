//! Ports consumed by the lifecycle engine.

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::entities::code::Code;
use crate::domain::value_objects::phone::PhoneNumber;
use crate::errors::StorageError;

use super::message::CodeMessage;
use super::types::{DispatchError, GatewayResult, SendRecord};

/// Key-value store holding one `Code` per storage key.
///
/// The store owns serialization of the entity and its own expiry
/// mechanism; an entry past its TTL reads back as absent. No guarantees
/// beyond single-key atomicity of each call are required.
#[async_trait]
pub trait CodeStorage: Send + Sync {
    /// Persists `code` under `key`, replacing any prior entry, with the
    /// given time-to-live.
    async fn set(&self, key: &str, code: &Code, ttl: Duration) -> Result<(), StorageError>;

    /// Loads the entry under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Code>, StorageError>;

    /// Removes the entry under `key`. Removing an absent key is not an error.
    async fn forget(&self, key: &str) -> Result<(), StorageError>;
}

/// External message-delivery dispatcher.
#[async_trait]
pub trait SmsDispatcher: Send + Sync {
    /// Delivers `message` to `recipient` through the named gateways, in
    /// preference order. Returns the per-gateway outcomes, or
    /// `DispatchError::NoGatewayAvailable` carrying the partial results
    /// when every gateway failed.
    async fn send(
        &self,
        recipient: &PhoneNumber,
        message: &CodeMessage,
        gateways: &[String],
    ) -> Result<Vec<GatewayResult>, DispatchError>;
}

/// Fire-and-forget audit sink for send attempts.
///
/// Implementations must never block the caller; failures stay inside the
/// logger and are never observed by the engine.
pub trait AuditLogger: Send + Sync {
    fn log(&self, record: SendRecord);
}
