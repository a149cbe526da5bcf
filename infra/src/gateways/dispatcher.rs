//! Ordered gateway dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use sg_core::services::sms::{
    CodeMessage, DeliveryStatus, DispatchError, GatewayResult, SmsDispatcher,
};
use sg_core::PhoneNumber;

use super::{mask_number, Gateway};

/// Dispatcher that tries gateways in the caller's preference order and
/// stops at the first success.
///
/// Every gateway consulted contributes a `GatewayResult`; when none
/// succeeds the collected results travel back inside
/// `DispatchError::NoGatewayAvailable` so the audit trail keeps the full
/// picture.
#[derive(Default)]
pub struct OrderedDispatcher {
    gateways: HashMap<String, Arc<dyn Gateway>>,
}

impl OrderedDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gateway under its own name. Later registrations with
    /// the same name replace earlier ones.
    pub fn register(mut self, gateway: Arc<dyn Gateway>) -> Self {
        self.gateways.insert(gateway.name().to_string(), gateway);
        self
    }
}

#[async_trait]
impl SmsDispatcher for OrderedDispatcher {
    async fn send(
        &self,
        recipient: &PhoneNumber,
        message: &CodeMessage,
        gateways: &[String],
    ) -> Result<Vec<GatewayResult>, DispatchError> {
        let mut results = Vec::with_capacity(gateways.len());

        for name in gateways {
            let Some(gateway) = self.gateways.get(name) else {
                warn!(gateway = %name, "Gateway not registered, skipping");
                results.push(GatewayResult {
                    gateway: name.clone(),
                    status: DeliveryStatus::Failure,
                    raw: json!({"error": "gateway not registered"}),
                });
                continue;
            };

            match gateway.deliver(recipient, message).await {
                Ok(raw) => {
                    info!(
                        gateway = %name,
                        recipient = %mask_number(recipient.number()),
                        "Message delivered"
                    );
                    results.push(GatewayResult {
                        gateway: name.clone(),
                        status: DeliveryStatus::Success,
                        raw,
                    });
                    return Ok(results);
                }
                Err(err) => {
                    warn!(gateway = %name, error = %err, "Gateway delivery failed");
                    results.push(GatewayResult {
                        gateway: name.clone(),
                        status: DeliveryStatus::Failure,
                        raw: json!({"error": err.to_string()}),
                    });
                }
            }
        }

        Err(DispatchError::NoGatewayAvailable { results })
    }
}
