//! Dispatch result and audit record types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::code::Code;

/// Per-gateway delivery outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Success,
    Failure,
}

/// Outcome reported by one gateway for one dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayResult {
    /// Gateway name as registered with the dispatcher
    pub gateway: String,
    /// Delivery outcome
    pub status: DeliveryStatus,
    /// Raw provider response, preserved for the audit log
    pub raw: serde_json::Value,
}

impl GatewayResult {
    pub fn is_success(&self) -> bool {
        self.status == DeliveryStatus::Success
    }
}

/// Errors raised by a dispatcher.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Every gateway in the preference list failed (or none resolved).
    /// Carries the per-gateway outcomes collected before giving up.
    #[error("No gateway available for dispatch")]
    NoGatewayAvailable { results: Vec<GatewayResult> },

    #[error("Dispatch transport error: {0}")]
    Transport(String),
}

/// One send attempt handed to the audit logger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRecord {
    /// Snapshot of the code at dispatch time
    pub code: Code,
    /// Raw dispatch results (or the error that aborted dispatch)
    pub raw: serde_json::Value,
    /// Whether at least one gateway reported success
    pub sent: bool,
}
