//! API response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status body used by every passcode endpoint
///
/// Success bodies carry only `status`; error bodies add a machine-readable
/// `reason` and, for delivery failures, free-form `details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// `"sent"`, `"verified"` or `"error"`
    pub status: String,

    /// Reason code (present on errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl StatusResponse {
    /// Create a success body with the given status
    pub fn ok(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            reason: None,
            details: None,
        }
    }

    /// Create an error body with a reason code
    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            status: String::from("error"),
            reason: Some(reason.into()),
            details: None,
        }
    }

    /// Attach details to the body
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Check if the body reports an error
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Time of the check
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Create a healthy response for the named service
    pub fn healthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: String::from("healthy"),
            service: service.into(),
            version: version.into(),
            timestamp: Utc::now(),
        }
    }
}
