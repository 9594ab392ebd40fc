//! Traits for directory, store, generator and delivery integration

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::{ConsumeOutcome, OtpRecord};
use crate::domain::value_objects::{DeliveryTarget, Subject};
use crate::errors::DeliveryError;

/// Read path of the subject → delivery target mapping
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Resolve a subject to its delivery target, `None` if never registered
    async fn resolve(&self, subject: &Subject) -> Option<DeliveryTarget>;
}

/// Storage for at most one pending passcode per subject
///
/// Implementations must make `put` and `try_consume` atomic per subject and
/// must not let operations on different subjects block one another for
/// longer than a map access.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Replace any pending record for `subject` with a fresh one
    async fn put(
        &self,
        subject: &Subject,
        code: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> OtpRecord;

    /// Present `candidate` for `subject` at `now`, consuming the record on
    /// `Verified` and purging it on `Expired`
    async fn try_consume(&self, subject: &Subject, candidate: &str, now: DateTime<Utc>)
        -> ConsumeOutcome;

    /// Drop every record expired at `now`, returning how many were dropped
    async fn purge_expired(&self, now: DateTime<Utc>) -> usize;

    /// Number of pending records
    async fn pending_count(&self) -> usize;
}

/// Source of passcodes
pub trait CodeGenerator: Send + Sync {
    /// Produce a fresh numeric passcode
    fn generate(&self) -> String;
    /// Number of digits produced
    fn code_length(&self) -> usize;
}

/// Outbound text channel to a delivery target
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Send `message` to `target`, returning the provider's message id
    async fn send(&self, target: &DeliveryTarget, message: &str) -> Result<String, DeliveryError>;

    /// Name of the provider behind the channel
    fn provider_name(&self) -> &str;
}
