//! Verification-code lifecycle engine implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Duration;
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde_json::Value;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, warn};

use crate::domain::entities::code::Code;
use crate::domain::value_objects::phone::PhoneNumber;
use crate::errors::{SmsError, SmsResult};

use super::clock::Clock;
use super::config::SmsConfig;
use super::message::{CodeMessage, MessageData};
use super::traits::{AuditLogger, CodeStorage, SmsDispatcher};
use super::types::{DispatchError, GatewayResult, SendRecord};

/// Gateway name dispatch is rerouted to in debug mode.
pub const ERRORLOG_GATEWAY: &str = "errorlog";

/// Resend cooldown after a successful dispatch, in seconds.
const RESEND_COOLDOWN_SECONDS: i64 = 60;

/// The verification-code lifecycle engine.
///
/// Owns generation, storage-backed state transitions, expiry enforcement,
/// attempt limiting, and resend throttling. Dispatch and audit logging are
/// external collaborators reached through the `SmsDispatcher` and
/// `AuditLogger` ports.
///
/// Callers observe only booleans; dispatch diagnostics flow exclusively
/// through the audit log. Storage failures are the one condition that
/// surfaces as an error.
pub struct SmsService<S: CodeStorage, D: SmsDispatcher> {
    storage: Arc<S>,
    dispatcher: Arc<D>,
    audit: Option<Arc<dyn AuditLogger>>,
    config: SmsConfig,
    clock: Arc<dyn Clock>,
    // Serializes the read-modify-write sequence per storage key; distinct
    // keys proceed in parallel. Entries live only while a call holds or
    // awaits the key's lock.
    key_locks: Mutex<KeyLockRegistry>,
}

type KeyLockRegistry = HashMap<String, Arc<tokio::sync::Mutex<()>>>;

/// Holds one key's lock for the duration of a lifecycle call. Dropping it
/// releases the lock and evicts the registry entry when no other call is
/// waiting on the same key, keeping the registry bounded by the number of
/// in-flight operations.
struct KeyLockGuard<'a> {
    permit: Option<OwnedMutexGuard<()>>,
    registry: &'a Mutex<KeyLockRegistry>,
    key: String,
}

impl Drop for KeyLockGuard<'_> {
    fn drop(&mut self) {
        // Release the key lock before inspecting reference counts
        self.permit.take();

        let mut locks = self.registry.lock().expect("key lock registry poisoned");
        if let Some(lock) = locks.get(&self.key) {
            // Waiters each hold a reference; one means the registry's own
            if Arc::strong_count(lock) == 1 {
                locks.remove(&self.key);
            }
        }
    }
}

impl<S: CodeStorage, D: SmsDispatcher> SmsService<S, D> {
    /// Creates an engine with the given collaborators and configuration.
    pub fn new(
        storage: Arc<S>,
        dispatcher: Arc<D>,
        audit: Option<Arc<dyn AuditLogger>>,
        config: SmsConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            dispatcher,
            audit,
            config,
            clock,
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &SmsConfig {
        &self.config
    }

    /// Resolves the code for `phone` (reusing a still-valid one, minting a
    /// fresh one otherwise), dispatches it, and records the outcome.
    ///
    /// Returns `Ok(true)` when at least one gateway reported success. All
    /// dispatch failures are translated into `Ok(false)`; the code stays in
    /// storage either way so that verification and throttling still apply.
    /// The send attempt is always handed to the audit logger (when enabled),
    /// success or not.
    pub async fn request_send(
        &self,
        phone: &PhoneNumber,
        data: MessageData,
        gateways: &[String],
    ) -> SmsResult<bool> {
        let key = phone.storage_key();
        let _guard = self.lock_key(&key).await;

        let mut code = match self.storage.get(&key).await? {
            Some(existing) if !self.needs_new_code(&existing) => {
                debug!(key = %key, "Reusing stored verification code");
                existing
            }
            _ => {
                let fresh = self.generate_code(phone);
                self.storage.set(&key, &fresh, self.code_ttl()).await?;
                info!(recipient = %phone, "Generated new verification code");
                fresh
            }
        };

        let message = match data {
            MessageData::Prebuilt(message) => message,
            MessageData::Overrides(overrides) => CodeMessage::from_config(
                &code.code,
                self.config.code.valid_minutes,
                &overrides,
                &self.config,
            ),
        };

        // Debug mode never touches a real gateway: the full pipeline runs
        // against the errorlog sink instead.
        let gateways: Vec<String> = if self.config.debug {
            vec![ERRORLOG_GATEWAY.to_string()]
        } else if gateways.is_empty() {
            self.config.default_gateways.clone()
        } else {
            gateways.to_vec()
        };

        let (sent, raw) = match self.dispatcher.send(phone, &message, &gateways).await {
            Ok(results) => {
                let sent = results.iter().any(GatewayResult::is_success);
                if sent {
                    code.mark_sent(self.clock.now());
                    self.storage.set(&key, &code, self.remaining_ttl(&code)).await?;
                }
                (sent, serde_json::to_value(&results).unwrap_or(Value::Null))
            }
            Err(DispatchError::NoGatewayAvailable { results }) => {
                warn!(recipient = %phone, "No gateway available for verification code");
                (false, serde_json::to_value(&results).unwrap_or(Value::Null))
            }
            Err(err) => {
                warn!(recipient = %phone, error = %err, "Verification code dispatch failed");
                (false, Value::String(err.to_string()))
            }
        };

        if self.config.audit_log {
            if let Some(audit) = &self.audit {
                audit.log(SendRecord {
                    code: code.clone(),
                    raw,
                    sent,
                });
            }
        }

        Ok(sent)
    }

    /// Whether the stored code must be replaced before the next send.
    ///
    /// A code is kept while it is still inside its validity window and,
    /// when an attempt limit is configured, still under that limit. A
    /// `max_attempts` of `0` disables the limit entirely, so only expiry
    /// forces rotation.
    pub fn needs_new_code(&self, code: &Code) -> bool {
        if code.is_expired(self.clock.now()) {
            return true;
        }
        let max_attempts = self.config.code.max_attempts;
        max_attempts > 0 && code.attempts >= max_attempts
    }

    /// Mints a fresh code for `phone`: a fixed-length string of uniformly
    /// chosen decimal digits, unsent, with a zeroed attempt counter and an
    /// expiry of `valid_minutes` from now.
    pub fn generate_code(&self, phone: &PhoneNumber) -> Code {
        let digits = self.random_digits();
        let expire_at = self.clock.now() + Duration::minutes(self.config.code.valid_minutes);

        Code::new(
            phone.number().to_string(),
            phone.area().map(str::to_string),
            digits,
            expire_at,
        )
    }

    /// Advisory resend throttle: true when no code is stored, the stored
    /// code was never successfully sent, or the last successful send is
    /// more than sixty seconds old.
    ///
    /// `request_send` does not enforce this itself; callers are expected
    /// to check before asking for a resend.
    pub async fn can_send(&self, phone: &PhoneNumber) -> SmsResult<bool> {
        let key = phone.storage_key();

        match self.storage.get(&key).await? {
            None => Ok(true),
            Some(code) => match code.sent_at {
                Some(sent_at) => {
                    Ok(sent_at < self.clock.now() - Duration::seconds(RESEND_COOLDOWN_SECONDS))
                }
                None => Ok(true),
            },
        }
    }

    /// Compares `input` against the stored code.
    ///
    /// Absent code rejects. An exact match succeeds without touching the
    /// attempt counter; the caller must `clear` once the guarded action has
    /// completed. A mismatch increments `attempts` and persists the updated
    /// entry - the sole attempt-limiting mutation path, which runs for as
    /// long as the entry survives in storage.
    pub async fn verify(&self, phone: &PhoneNumber, input: &str) -> SmsResult<bool> {
        let key = phone.storage_key();
        let _guard = self.lock_key(&key).await;

        let Some(mut code) = self.storage.get(&key).await? else {
            return Ok(false);
        };

        if code.code.len() == input.len() && constant_time_eq(code.code.as_bytes(), input.as_bytes()) {
            return Ok(true);
        }

        code.record_failed_attempt();
        self.storage.set(&key, &code, self.remaining_ttl(&code)).await?;
        debug!(key = %key, attempts = code.attempts, "Verification code mismatch");

        Ok(false)
    }

    /// Deletes the stored code, preventing replay once the verified action
    /// has been durably completed.
    pub async fn clear(&self, phone: &PhoneNumber) -> SmsResult<()> {
        let key = phone.storage_key();
        let _guard = self.lock_key(&key).await;

        self.storage.forget(&key).await?;
        info!(recipient = %phone, "Cleared verification code");

        Ok(())
    }

    /// Debug-mode read-back of the stored code, for exercising the pipeline
    /// without a real delivery channel.
    pub async fn peek_code(&self, phone: &PhoneNumber) -> SmsResult<Option<Code>> {
        if !self.config.debug {
            return Err(SmsError::DebugDisabled);
        }

        Ok(self.storage.get(&phone.storage_key()).await?)
    }

    fn code_ttl(&self) -> Duration {
        Duration::minutes(self.config.code.valid_minutes)
    }

    /// TTL for re-persisting an existing code: the time left until its
    /// expiry, never the full validity window again. Floored at the resend
    /// cooldown so attempt and throttle bookkeeping on a near-expired entry
    /// does not vanish mid-flight.
    fn remaining_ttl(&self, code: &Code) -> Duration {
        let floor = Duration::seconds(RESEND_COOLDOWN_SECONDS);
        let remaining = code.expire_at - self.clock.now();
        if remaining > floor {
            remaining
        } else {
            floor
        }
    }

    fn random_digits(&self) -> String {
        let length = self.config.code.length;
        if self.config.secure_rng {
            let mut rng = OsRng;
            (0..length).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
        } else {
            let mut rng = rand::thread_rng();
            (0..length).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
        }
    }

    async fn lock_key(&self, key: &str) -> KeyLockGuard<'_> {
        let lock = {
            let mut locks = self.key_locks.lock().expect("key lock registry poisoned");
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };

        KeyLockGuard {
            permit: Some(lock.lock_owned().await),
            registry: &self.key_locks,
            key: key.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn active_key_locks(&self) -> usize {
        self.key_locks.lock().expect("key lock registry poisoned").len()
    }
}
