//! Mock collaborators for engine tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use crate::domain::entities::code::Code;
use crate::domain::value_objects::phone::PhoneNumber;
use crate::errors::StorageError;
use crate::services::sms::clock::Clock;
use crate::services::sms::message::CodeMessage;
use crate::services::sms::traits::{AuditLogger, CodeStorage, SmsDispatcher};
use crate::services::sms::types::{DeliveryStatus, DispatchError, GatewayResult, SendRecord};

/// Manually advanced clock so tests never sleep through cooldowns.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self { now: Mutex::new(now) })
    }

    pub fn epoch() -> Arc<Self> {
        Self::starting_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// In-memory storage; entries live until forgotten so tests can observe
/// post-expiry behaviour.
pub struct MockStorage {
    pub codes: Arc<Mutex<HashMap<String, Code>>>,
    pub ttls: Arc<Mutex<HashMap<String, Duration>>>,
    pub should_fail: bool,
}

impl MockStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            codes: Arc::new(Mutex::new(HashMap::new())),
            ttls: Arc::new(Mutex::new(HashMap::new())),
            should_fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            codes: Arc::new(Mutex::new(HashMap::new())),
            ttls: Arc::new(Mutex::new(HashMap::new())),
            should_fail: true,
        })
    }

    pub fn stored(&self, phone: &PhoneNumber) -> Option<Code> {
        self.codes.lock().unwrap().get(&phone.storage_key()).cloned()
    }

    /// TTL passed with the most recent write for this recipient.
    pub fn last_ttl(&self, phone: &PhoneNumber) -> Option<Duration> {
        self.ttls.lock().unwrap().get(&phone.storage_key()).copied()
    }
}

#[async_trait]
impl CodeStorage for MockStorage {
    async fn set(&self, key: &str, code: &Code, ttl: Duration) -> Result<(), StorageError> {
        if self.should_fail {
            return Err(StorageError::Unavailable("mock storage down".to_string()));
        }
        self.codes.lock().unwrap().insert(key.to_string(), code.clone());
        self.ttls.lock().unwrap().insert(key.to_string(), ttl);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Code>, StorageError> {
        if self.should_fail {
            return Err(StorageError::Unavailable("mock storage down".to_string()));
        }
        Ok(self.codes.lock().unwrap().get(key).cloned())
    }

    async fn forget(&self, key: &str) -> Result<(), StorageError> {
        if self.should_fail {
            return Err(StorageError::Unavailable("mock storage down".to_string()));
        }
        self.codes.lock().unwrap().remove(key);
        Ok(())
    }
}

/// What the mock dispatcher should do with the next send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Succeed,
    FailAllGateways,
    TransportError,
}

/// Dispatcher that records every call and produces a scripted outcome.
pub struct MockDispatcher {
    pub outcome: Mutex<DispatchOutcome>,
    pub calls: Mutex<Vec<(String, String, Vec<String>)>>,
}

impl MockDispatcher {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(DispatchOutcome::Succeed),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(DispatchOutcome::FailAllGateways),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn set_outcome(&self, outcome: DispatchOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn last_call(&self) -> Option<(String, String, Vec<String>)> {
        self.calls.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SmsDispatcher for MockDispatcher {
    async fn send(
        &self,
        recipient: &PhoneNumber,
        message: &CodeMessage,
        gateways: &[String],
    ) -> Result<Vec<GatewayResult>, DispatchError> {
        self.calls.lock().unwrap().push((
            recipient.full(),
            message.content().to_string(),
            gateways.to_vec(),
        ));

        let gateway = gateways.first().cloned().unwrap_or_else(|| "mock".to_string());
        match *self.outcome.lock().unwrap() {
            DispatchOutcome::Succeed => Ok(vec![GatewayResult {
                gateway,
                status: DeliveryStatus::Success,
                raw: json!({"message_id": "mock-1"}),
            }]),
            DispatchOutcome::FailAllGateways => Err(DispatchError::NoGatewayAvailable {
                results: gateways
                    .iter()
                    .map(|name| GatewayResult {
                        gateway: name.clone(),
                        status: DeliveryStatus::Failure,
                        raw: json!({"error": "unreachable"}),
                    })
                    .collect(),
            }),
            DispatchOutcome::TransportError => {
                Err(DispatchError::Transport("connection reset".to_string()))
            }
        }
    }
}

/// Audit logger that captures every record synchronously.
pub struct MockAuditLogger {
    pub records: Mutex<Vec<SendRecord>>,
}

impl MockAuditLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(Vec::new()),
        })
    }

    pub fn recorded(&self) -> Vec<SendRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl AuditLogger for MockAuditLogger {
    fn log(&self, record: SendRecord) {
        self.records.lock().unwrap().push(record);
    }
}
