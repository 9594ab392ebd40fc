//! In-memory collaborators for exercising the verification service
//!
//! These are deterministic stand-ins for the directory, store, generator,
//! clock and delivery channel. They are public so downstream crates can
//! drive the service in their own tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::{ConsumeOutcome, OtpRecord};
use crate::domain::value_objects::{DeliveryTarget, Subject};
use crate::errors::DeliveryError;

use super::clock::Clock;
use super::traits::{CodeGenerator, DeliveryChannel, IdentityDirectory, OtpStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Generator returning a scripted sequence of codes
///
/// Once the script is exhausted the last code is repeated.
pub struct FixedCodeGenerator {
    codes: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl FixedCodeGenerator {
    pub fn new<I, T>(codes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let codes: VecDeque<String> = codes.into_iter().map(Into::into).collect();
        let last = codes.front().cloned().unwrap_or_else(|| "000000".to_string());
        Self {
            codes: Mutex::new(codes),
            last: Mutex::new(last),
        }
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> String {
        let mut last = lock(&self.last);
        if let Some(code) = lock(&self.codes).pop_front() {
            *last = code;
        }
        last.clone()
    }

    fn code_length(&self) -> usize {
        lock(&self.last).len()
    }
}

/// Clock that only moves when told to
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = lock(&self.now);
        *now += by;
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *lock(&self.now) = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *lock(&self.now)
    }
}

/// A message captured by [`RecordingDeliveryChannel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub target: DeliveryTarget,
    pub text: String,
}

/// Delivery channel that records messages instead of sending them
#[derive(Default)]
pub struct RecordingDeliveryChannel {
    sent: Mutex<Vec<SentMessage>>,
    failure: Mutex<Option<String>>,
}

impl RecordingDeliveryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel whose every send fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        let channel = Self::default();
        channel.fail_with(Some(reason.into()));
        channel
    }

    /// Switch failure injection on (`Some`) or off (`None`)
    pub fn fail_with(&self, reason: Option<String>) {
        *lock(&self.failure) = reason;
    }

    pub fn sent_messages(&self) -> Vec<SentMessage> {
        lock(&self.sent).clone()
    }

    pub fn sent_count(&self) -> usize {
        lock(&self.sent).len()
    }

    /// Text of the most recent message sent to `target`
    pub fn last_message_to(&self, target: &DeliveryTarget) -> Option<String> {
        lock(&self.sent)
            .iter()
            .rev()
            .find(|message| &message.target == target)
            .map(|message| message.text.clone())
    }
}

#[async_trait]
impl DeliveryChannel for RecordingDeliveryChannel {
    async fn send(&self, target: &DeliveryTarget, message: &str) -> Result<String, DeliveryError> {
        if let Some(reason) = lock(&self.failure).clone() {
            return Err(DeliveryError::new(reason));
        }
        let mut sent = lock(&self.sent);
        sent.push(SentMessage {
            target: target.clone(),
            text: message.to_string(),
        });
        Ok(format!("recorded-{}", sent.len()))
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}

/// Directory backed by a plain map
#[derive(Default)]
pub struct MockIdentityDirectory {
    entries: Mutex<HashMap<Subject, DeliveryTarget>>,
}

impl MockIdentityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, subject: impl Into<Subject>, target: impl Into<DeliveryTarget>) -> Self {
        self.insert(subject, target);
        self
    }

    pub fn insert(&self, subject: impl Into<Subject>, target: impl Into<DeliveryTarget>) {
        lock(&self.entries).insert(subject.into(), target.into());
    }
}

#[async_trait]
impl IdentityDirectory for MockIdentityDirectory {
    async fn resolve(&self, subject: &Subject) -> Option<DeliveryTarget> {
        lock(&self.entries).get(subject).cloned()
    }
}

/// Store backed by a single mutex-guarded map
#[derive(Default)]
pub struct MockOtpStore {
    records: Mutex<HashMap<Subject, OtpRecord>>,
}

impl MockOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending record for `subject`, if any
    pub fn record(&self, subject: &Subject) -> Option<OtpRecord> {
        lock(&self.records).get(subject).cloned()
    }
}

#[async_trait]
impl OtpStore for MockOtpStore {
    async fn put(
        &self,
        subject: &Subject,
        code: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> OtpRecord {
        let record = OtpRecord::new(subject.clone(), code.to_string(), issued_at, ttl);
        lock(&self.records).insert(subject.clone(), record.clone());
        record
    }

    async fn try_consume(
        &self,
        subject: &Subject,
        candidate: &str,
        now: DateTime<Utc>,
    ) -> ConsumeOutcome {
        let mut records = lock(&self.records);
        let outcome = match records.get(subject) {
            Some(record) => record.check(candidate, now),
            None => return ConsumeOutcome::NotFound,
        };
        if outcome.removes_record() {
            records.remove(subject);
        }
        outcome
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        before - records.len()
    }

    async fn pending_count(&self) -> usize {
        lock(&self.records).len()
    }
}
