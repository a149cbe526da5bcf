//! # SmsGate Core
//!
//! Core business logic and domain layer for the SmsGate service.
//! This crate contains the verification-code lifecycle engine, domain
//! entities, storage/dispatch ports, and error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
