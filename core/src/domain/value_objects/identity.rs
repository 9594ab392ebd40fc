//! Subject and delivery target identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

use tg_shared::utils::phone::mask_phone_number;

/// The identity being authenticated (e.g. a phone number)
///
/// Opaque to the core: two subjects are equal only if their strings are equal.
/// `Display` masks the value so subjects can be logged directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// Wrap a raw subject identifier
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form for logs
    pub fn masked(&self) -> String {
        mask_phone_number(&self.0)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl From<&str> for Subject {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Address the delivery channel uses to reach a subject (e.g. a Telegram chat id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryTarget(String);

impl DeliveryTarget {
    /// Wrap a raw target handle
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw handle
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeliveryTarget {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for DeliveryTarget {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}
