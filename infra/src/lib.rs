//! # SmsGate Infrastructure
//!
//! Concrete adapters behind the core engine's ports:
//! - **Storage**: in-memory and Redis code stores
//! - **Gateways**: ordered dispatcher over named delivery gateways
//! - **Audit**: queue-backed send logger with a MySQL store

use thiserror::Error;

pub mod audit;
pub mod gateways;
pub mod storage;

/// Errors raised while constructing or driving infrastructure adapters.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "mysql-log")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub mod config {
    //! Configuration for infrastructure adapters.

    /// Redis code-store settings.
    #[derive(Debug, Clone)]
    pub struct StorageConfig {
        /// Redis connection URL
        pub url: String,
        /// Prefix applied to every storage key
        pub key_prefix: String,
    }

    impl Default for StorageConfig {
        fn default() -> Self {
            Self {
                url: "redis://127.0.0.1:6379".to_string(),
                key_prefix: "sms".to_string(),
            }
        }
    }

    impl StorageConfig {
        /// Loads settings from the environment (`SMS_REDIS_URL`,
        /// `SMS_KEY_PREFIX`), falling back to defaults. Reads `.env` when
        /// present.
        pub fn from_env() -> Self {
            let _ = dotenvy::dotenv();
            let defaults = Self::default();
            Self {
                url: std::env::var("SMS_REDIS_URL").unwrap_or(defaults.url),
                key_prefix: std::env::var("SMS_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            }
        }
    }

    /// Send-log database settings.
    #[derive(Debug, Clone)]
    pub struct SendLogConfig {
        /// MySQL connection URL
        pub database_url: String,
        /// Capacity of the in-process audit queue
        pub queue_capacity: usize,
    }

    impl Default for SendLogConfig {
        fn default() -> Self {
            Self {
                database_url: "mysql://localhost:3306/smsgate".to_string(),
                queue_capacity: 1024,
            }
        }
    }

    impl SendLogConfig {
        /// Loads settings from the environment (`SMS_LOG_DATABASE_URL`,
        /// `SMS_LOG_QUEUE_CAPACITY`), falling back to defaults.
        pub fn from_env() -> Self {
            let _ = dotenvy::dotenv();
            let defaults = Self::default();
            Self {
                database_url: std::env::var("SMS_LOG_DATABASE_URL")
                    .unwrap_or(defaults.database_url),
                queue_capacity: std::env::var("SMS_LOG_QUEUE_CAPACITY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.queue_capacity),
            }
        }
    }
}
