//! Phone number value object and storage-key derivation.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Namespace prefixed to the raw number before digesting into a storage key
const KEY_NAMESPACE: &str = "sms.";

/// A dispatch recipient: subscriber number plus optional country/area prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    number: String,
    area: Option<String>,
}

impl PhoneNumber {
    /// Creates a recipient without an area prefix.
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            area: None,
        }
    }

    /// Creates a recipient with a country/area prefix.
    pub fn with_area(number: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            area: Some(area.into()),
        }
    }

    /// Subscriber number without the area prefix.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Country/area prefix, if any.
    pub fn area(&self) -> Option<&str> {
        self.area.as_deref()
    }

    /// Full number, `+{area}{number}` when an area prefix is set.
    pub fn full(&self) -> String {
        match &self.area {
            Some(area) => format!("+{}{}", area, self.number),
            None => self.number.clone(),
        }
    }

    /// Derives the storage key for this recipient.
    ///
    /// The key is a hex-encoded SHA-256 digest of `sms.{area}{number}`.
    /// This is an addressing convention, not a security control: it keeps
    /// keys stable and uniform, and leaves no raw number readable in key
    /// space.
    pub fn storage_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(KEY_NAMESPACE.as_bytes());
        if let Some(area) = &self.area {
            hasher.update(area.as_bytes());
        }
        hasher.update(self.number.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full())
    }
}
