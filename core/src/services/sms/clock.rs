//! Clock abstraction for the lifecycle engine.
//!
//! Expiry and throttling decisions are all relative to "now", so the
//! engine takes its time source as a dependency. Tests drive a manual
//! clock instead of sleeping through real cooldown windows.

use chrono::{DateTime, Utc};

/// Time source consumed by the engine.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
