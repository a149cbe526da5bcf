//! Message gateways and the ordered dispatcher.
//!
//! A `Gateway` is one named delivery channel; the `OrderedDispatcher`
//! implements the core `SmsDispatcher` port by walking a preference list
//! of gateway names until one delivers.

pub mod dispatcher;
pub mod errorlog;
pub mod mock;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use thiserror::Error;

use sg_core::services::sms::CodeMessage;
use sg_core::PhoneNumber;

pub use dispatcher::OrderedDispatcher;
pub use errorlog::ErrorlogGateway;
pub use mock::MockGateway;

/// A single named delivery channel.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Name the dispatcher resolves this gateway under.
    fn name(&self) -> &str;

    /// Delivers `message` to `recipient`, returning the raw provider
    /// response on success.
    async fn deliver(
        &self,
        recipient: &PhoneNumber,
        message: &CodeMessage,
    ) -> Result<serde_json::Value, GatewayError>;
}

/// A single gateway's delivery failure.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Masks all but the last four digits of a number for log output.
pub fn mask_number(number: &str) -> String {
    if number.len() <= 4 {
        return "****".to_string();
    }
    let visible = &number[number.len() - 4..];
    format!("{}{}", "*".repeat(number.len() - 4), visible)
}
