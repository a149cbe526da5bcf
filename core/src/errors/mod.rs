//! Error types for the SmsGate core.

pub mod domain_error;

pub use domain_error::{SmsError, SmsResult, StorageError};
