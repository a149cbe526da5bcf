//! Redis-backed code store.
//!
//! Entries are serialized with serde_json and written with `SET .. EX`,
//! so Redis itself enforces the validity window; a lapsed entry simply
//! reads back as absent.

use async_trait::async_trait;
use chrono::Duration;
use redis::AsyncCommands;
use tracing::debug;

use sg_core::errors::StorageError;
use sg_core::services::sms::CodeStorage;
use sg_core::Code;

use crate::config::StorageConfig;
use crate::InfraError;

/// Production code store on Redis.
#[derive(Clone)]
pub struct RedisStorage {
    client: redis::Client,
    key_prefix: String,
}

impl RedisStorage {
    /// Creates a store from configuration. Fails on a malformed URL;
    /// connectivity problems only surface on first use.
    pub fn connect(config: &StorageConfig) -> Result<Self, InfraError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| InfraError::Config(format!("invalid redis url: {}", e)))?;

        Ok(Self {
            client,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }

    async fn connection(&self) -> Result<redis::aio::Connection, StorageError> {
        self.client
            .get_async_connection()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl CodeStorage for RedisStorage {
    async fn set(&self, key: &str, code: &Code, ttl: Duration) -> Result<(), StorageError> {
        let payload = serde_json::to_string(code)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let seconds = ttl.num_seconds().max(1);
        let mut conn = self.connection().await?;

        redis::cmd("SET")
            .arg(self.namespaced(key))
            .arg(payload)
            .arg("EX")
            .arg(seconds)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        debug!(key = %key, ttl_seconds = seconds, "Stored verification code");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Code>, StorageError> {
        let mut conn = self.connection().await?;
        let payload: Option<String> = conn
            .get(self.namespaced(key))
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        match payload {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    async fn forget(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(self.namespaced(key))
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        Ok(())
    }
}
