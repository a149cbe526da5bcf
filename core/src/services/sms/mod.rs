//! Verification-code lifecycle engine.
//!
//! This module owns the full code lifecycle:
//! - code generation with a configurable length and validity window
//! - storage-backed state transitions (mint, reuse, replace)
//! - verification with attempt limiting
//! - resend throttling
//! - dispatch coordination and fire-and-forget audit logging

mod clock;
mod config;
mod message;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{Clock, SystemClock};
pub use config::{CodeConfig, SmsConfig};
pub use message::{CodeMessage, MessageData, MessageOverrides};
pub use service::{SmsService, ERRORLOG_GATEWAY};
pub use traits::{AuditLogger, CodeStorage, SmsDispatcher};
pub use types::{DeliveryStatus, DispatchError, GatewayResult, SendRecord};
