//! Sharded in-memory OTP storage
//!
//! Records are spread across independently locked shards by subject hash:
//! - `put` and `try_consume` on one subject serialize on that subject's shard
//! - subjects on different shards never contend
//! - no lock is ever held across an `.await`

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use tg_core::domain::entities::{ConsumeOutcome, OtpRecord};
use tg_core::domain::value_objects::Subject;
use tg_core::services::verification::OtpStore;

/// Default number of shards
pub const DEFAULT_SHARD_COUNT: usize = 16;

type Shard = HashMap<Subject, OtpRecord>;

/// In-memory OTP store holding at most one pending record per subject
pub struct ShardedOtpStore {
    shards: Vec<Mutex<Shard>>,
    hasher: RandomState,
}

impl ShardedOtpStore {
    /// Create a store with [`DEFAULT_SHARD_COUNT`] shards
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARD_COUNT)
    }

    /// Create a store with `count` shards (at least one)
    pub fn with_shards(count: usize) -> Self {
        let shards = (0..count.max(1)).map(|_| Mutex::new(HashMap::new())).collect();
        Self {
            shards,
            hasher: RandomState::new(),
        }
    }

    /// Number of shards
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Pending record for `subject`, if any
    pub fn get(&self, subject: &Subject) -> Option<OtpRecord> {
        self.shard(subject).get(subject).cloned()
    }

    fn shard_index(&self, subject: &Subject) -> usize {
        (self.hasher.hash_one(subject) as usize) % self.shards.len()
    }

    fn shard(&self, subject: &Subject) -> MutexGuard<'_, Shard> {
        lock(&self.shards[self.shard_index(subject)])
    }
}

impl Default for ShardedOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

// A panic while holding a shard cannot leave a record half-written, so a
// poisoned shard is still consistent.
fn lock(shard: &Mutex<Shard>) -> MutexGuard<'_, Shard> {
    shard.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl OtpStore for ShardedOtpStore {
    async fn put(
        &self,
        subject: &Subject,
        code: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> OtpRecord {
        let record = OtpRecord::new(subject.clone(), code.to_string(), issued_at, ttl);
        let replaced = self
            .shard(subject)
            .insert(subject.clone(), record.clone())
            .is_some();

        debug!(
            subject = %subject,
            replaced = replaced,
            expires_at = %record.expires_at,
            "Stored passcode record"
        );
        record
    }

    async fn try_consume(
        &self,
        subject: &Subject,
        candidate: &str,
        now: DateTime<Utc>,
    ) -> ConsumeOutcome {
        let mut shard = self.shard(subject);
        let outcome = match shard.get(subject) {
            Some(record) => record.check(candidate, now),
            None => return ConsumeOutcome::NotFound,
        };
        if outcome.removes_record() {
            shard.remove(subject);
        }
        outcome
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        self.shards
            .iter()
            .map(|shard| {
                let mut shard = lock(shard);
                let before = shard.len();
                shard.retain(|_, record| !record.is_expired(now));
                before - shard.len()
            })
            .sum()
    }

    async fn pending_count(&self) -> usize {
        self.shards.iter().map(|shard| lock(shard).len()).sum()
    }
}
