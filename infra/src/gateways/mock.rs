//! Scriptable mock gateway for tests and development.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use sg_core::services::sms::CodeMessage;
use sg_core::PhoneNumber;

use super::{Gateway, GatewayError};

/// Records every delivery and fails on demand.
pub struct MockGateway {
    name: String,
    should_fail: bool,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockGateway {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            should_fail: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            should_fail: true,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All `(recipient, content)` pairs delivered so far.
    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Content of the last message delivered to `recipient`, if any.
    pub fn last_message_to(&self, recipient: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == recipient)
            .map(|(_, content)| content.clone())
    }
}

#[async_trait]
impl Gateway for MockGateway {
    fn name(&self) -> &str {
        &self.name
    }

    async fn deliver(
        &self,
        recipient: &PhoneNumber,
        message: &CodeMessage,
    ) -> Result<serde_json::Value, GatewayError> {
        if self.should_fail {
            return Err(GatewayError::Delivery(format!(
                "{} is configured to fail",
                self.name
            )));
        }

        self.sent
            .lock()
            .unwrap()
            .push((recipient.full(), message.content().to_string()));

        Ok(json!({"message_id": format!("{}-{}", self.name, self.sent.lock().unwrap().len())}))
    }
}
