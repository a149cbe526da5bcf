//! Domain-specific error types for the verification-code lifecycle.

use thiserror::Error;

/// Errors raised by a storage backend.
///
/// The engine has no fallback storage, so these are never masked: a
/// storage failure aborts the lifecycle call that hit it.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend unreachable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize code entry: {0}")]
    Serialization(String),
}

/// Errors surfaced by the lifecycle engine.
///
/// Ordinary dispatch failures are not represented here: `request_send`
/// translates them into a `false` return and records diagnostics through
/// the audit log. Only conditions the caller must handle become errors.
#[derive(Error, Debug)]
pub enum SmsError {
    #[error("Storage backend failure: {0}")]
    Storage(#[from] StorageError),

    #[error("Code read-back is only available in debug mode")]
    DebugDisabled,
}

/// Result type alias for engine operations
pub type SmsResult<T> = Result<T, SmsError>;
