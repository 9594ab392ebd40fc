//! Domain-specific error types and error handling.

use thiserror::Error;

use tg_shared::utils::phone::mask_phone_number;

/// Core domain errors
///
/// Verification outcomes (`Verified`, `Expired`, `Invalid`) are not errors;
/// see [`crate::services::verification::VerifyOutcome`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Subject not registered: {}", mask_phone_number(.subject))]
    SubjectNotRegistered { subject: String },

    #[error("Delivery failed: {reason}")]
    DeliveryFailed { reason: String },

    /// Startup-time misconfiguration; never returned on a request path
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    /// Whether the caller may succeed by simply retrying later
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::DeliveryFailed { .. })
    }
}

/// Failure reported by a delivery channel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct DeliveryError {
    /// Provider-specific description of the failure
    pub reason: String,
}

impl DeliveryError {
    /// Create a delivery error with the given reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<DeliveryError> for DomainError {
    fn from(error: DeliveryError) -> Self {
        DomainError::DeliveryFailed {
            reason: error.reason,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
