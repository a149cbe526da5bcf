//! Errorlog gateway - the debug-mode delivery sink.
//!
//! Writes the would-be message to the log instead of any real channel,
//! and always reports success, so the whole pipeline can be exercised
//! without sending real messages.

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use sg_core::services::sms::CodeMessage;
use sg_core::PhoneNumber;

use super::{Gateway, GatewayError};

pub struct ErrorlogGateway;

/// Name the core engine routes to in debug mode.
const NAME: &str = "errorlog";

#[async_trait]
impl Gateway for ErrorlogGateway {
    fn name(&self) -> &str {
        NAME
    }

    async fn deliver(
        &self,
        recipient: &PhoneNumber,
        message: &CodeMessage,
    ) -> Result<serde_json::Value, GatewayError> {
        info!(
            gateway = NAME,
            recipient = %recipient,
            content = %message.content(),
            "Debug dispatch (no real gateway contacted)"
        );

        Ok(json!({"status": "logged", "recipient": recipient.full()}))
    }
}
