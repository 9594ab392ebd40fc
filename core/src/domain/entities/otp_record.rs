//! Pending one-time passcode entity.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Subject;

/// Result of presenting a candidate code against the pending record of a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumeOutcome {
    /// Code matched a live record; the record is consumed
    Verified,
    /// The record's window had closed; the record is purged
    Expired,
    /// Code did not match; the record stays pending
    Invalid,
    /// No record exists for the subject
    NotFound,
}

impl ConsumeOutcome {
    /// Whether the store must drop the record after this outcome
    pub fn removes_record(self) -> bool {
        matches!(self, ConsumeOutcome::Verified | ConsumeOutcome::Expired)
    }
}

/// A passcode issued to a subject and waiting to be verified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Subject the passcode was issued to
    pub subject: Subject,

    /// The numeric passcode
    pub code: String,

    /// Timestamp when the passcode was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the passcode is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record expiring `ttl` after `issued_at`
    ///
    /// An expiry past the representable range saturates at the latest
    /// representable instant.
    pub fn new(subject: Subject, code: String, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            subject,
            code,
            issued_at,
            expires_at,
        }
    }

    /// A record is expired strictly after `expires_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Compares the candidate with the stored code in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        // Length is not secret: every code of a deployment has the same length
        self.code.len() == candidate.len()
            && constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Decides the outcome of presenting `candidate` at `now`
    ///
    /// Expiry is checked before the code so an expired record reports
    /// `Expired` whatever code is presented.
    pub fn check(&self, candidate: &str, now: DateTime<Utc>) -> ConsumeOutcome {
        if self.is_expired(now) {
            ConsumeOutcome::Expired
        } else if self.matches(candidate) {
            ConsumeOutcome::Verified
        } else {
            ConsumeOutcome::Invalid
        }
    }

    /// Time left before expiry, or zero if already expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
