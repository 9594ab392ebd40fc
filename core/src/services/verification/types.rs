//! Types for verification service results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::ConsumeOutcome;
use crate::domain::value_objects::Subject;

/// Result of issuing a passcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedOtp {
    /// Subject the passcode was issued to
    pub subject: Subject,
    /// When the passcode was issued
    pub issued_at: DateTime<Utc>,
    /// When the passcode stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Message id reported by the delivery channel
    pub message_id: String,
}

/// Externally visible result of verifying a passcode
///
/// A missing record and a wrong code both map to `Invalid` so callers cannot
/// tell whether a subject has a pending passcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    Verified,
    Expired,
    Invalid,
}

impl VerifyOutcome {
    /// Check if verification succeeded
    pub fn is_verified(self) -> bool {
        self == VerifyOutcome::Verified
    }

    /// Stable lowercase name, used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            VerifyOutcome::Verified => "verified",
            VerifyOutcome::Expired => "expired",
            VerifyOutcome::Invalid => "invalid",
        }
    }
}

impl From<ConsumeOutcome> for VerifyOutcome {
    fn from(outcome: ConsumeOutcome) -> Self {
        match outcome {
            ConsumeOutcome::Verified => VerifyOutcome::Verified,
            ConsumeOutcome::Expired => VerifyOutcome::Expired,
            ConsumeOutcome::Invalid | ConsumeOutcome::NotFound => VerifyOutcome::Invalid,
        }
    }
}

impl std::fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
