//! Verification code entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of digits in a generated code
pub const DEFAULT_CODE_LENGTH: usize = 5;

/// Default validity window for a generated code (minutes)
pub const DEFAULT_VALID_MINUTES: i64 = 5;

/// One outstanding verification attempt for a `(phone_number, phone_area)` pair.
///
/// Exactly one `Code` exists per storage key at any time; a freshly
/// generated code fully replaces the prior one, including the attempt
/// counter. The `attempts` field only ever increases for the lifetime
/// of a given code value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    /// Subscriber number the code is bound to
    pub phone_number: String,

    /// Country/area prefix; `None` means "no area"
    #[serde(default)]
    pub phone_area: Option<String>,

    /// The secret digit string the user must supply
    pub code: String,

    /// Whether a dispatch attempt reported success
    pub sent: bool,

    /// Count of failed verification attempts
    pub attempts: u32,

    /// Moment after which the code is no longer valid for verification
    pub expire_at: DateTime<Utc>,

    /// Moment of the last successful dispatch; drives resend throttling
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
}

impl Code {
    /// Creates a fresh, unsent code with a zeroed attempt counter.
    pub fn new(
        phone_number: String,
        phone_area: Option<String>,
        code: String,
        expire_at: DateTime<Utc>,
    ) -> Self {
        Self {
            phone_number,
            phone_area,
            code,
            sent: false,
            attempts: 0,
            expire_at,
            sent_at: None,
        }
    }

    /// Whether the code has passed its validity window at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expire_at
    }

    /// Records a successful dispatch.
    pub fn mark_sent(&mut self, now: DateTime<Utc>) {
        self.sent = true;
        self.sent_at = Some(now);
    }

    /// Records one failed verification attempt.
    pub fn record_failed_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Full recipient number, `+{area}{number}` when an area prefix is set.
    ///
    /// This is the format the send log stores in its `mobile` column.
    pub fn full_number(&self) -> String {
        match &self.phone_area {
            Some(area) => format!("+{}{}", area, self.phone_number),
            None => self.phone_number.clone(),
        }
    }
}
