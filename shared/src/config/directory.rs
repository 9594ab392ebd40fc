//! Identity directory seeding

use serde::{Deserialize, Serialize};
use std::env;

use super::ConfigValidationError;

/// A single subject → delivery target binding
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Registration {
    /// Subject identifier (phone number)
    pub subject: String,
    /// Delivery target handle (Telegram chat id)
    pub target: String,
}

/// Bindings loaded into the identity directory at startup
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Pre-registered subjects
    pub registrations: Vec<Registration>,
}

impl DirectoryConfig {
    /// Load from `REGISTERED_USERS`, formatted as `subject=target,subject=target`
    pub fn from_env() -> Self {
        Self {
            registrations: env::var("REGISTERED_USERS")
                .map(|v| parse_registrations(&v))
                .unwrap_or_default(),
        }
    }

    /// Reject empty subjects or targets
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (index, registration) in self.registrations.iter().enumerate() {
            if registration.subject.trim().is_empty() || registration.target.trim().is_empty() {
                return Err(ConfigValidationError::EmptyRegistration { index });
            }
        }
        Ok(())
    }
}

/// Parse `subject=target` pairs separated by commas, skipping malformed entries
pub fn parse_registrations(value: &str) -> Vec<Registration> {
    value
        .split(',')
        .filter_map(|pair| {
            let (subject, target) = pair.split_once('=')?;
            let (subject, target) = (subject.trim(), target.trim());
            if subject.is_empty() || target.is_empty() {
                return None;
            }
            Some(Registration {
                subject: subject.to_string(),
                target: target.to_string(),
            })
        })
        .collect()
}
