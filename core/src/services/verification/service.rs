//! Main verification service implementation

use std::sync::Arc;

use crate::domain::entities::ConsumeOutcome;
use crate::domain::value_objects::Subject;
use crate::errors::{DomainError, DomainResult};

use super::clock::{Clock, SystemClock};
use super::config::OtpServiceConfig;
use super::generator::SecureCodeGenerator;
use super::traits::{CodeGenerator, DeliveryChannel, IdentityDirectory, OtpStore};
use super::types::{IssuedOtp, VerifyOutcome};

/// Verification service driving passcode issuance and verification
///
/// Generic over the three collaborators that touch the outside world so the
/// API layer can be monomorphised over concrete infrastructure while tests
/// plug in the mocks from [`super::mock`].
pub struct OtpService<D: IdentityDirectory, S: OtpStore, C: DeliveryChannel> {
    /// Subject → delivery target lookup
    directory: Arc<D>,
    /// Pending passcode storage
    store: Arc<S>,
    /// Outbound message channel
    channel: Arc<C>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Passcode source
    generator: Arc<dyn CodeGenerator>,
    /// Time source for expiry arithmetic
    clock: Arc<dyn Clock>,
}

impl<D: IdentityDirectory, S: OtpStore, C: DeliveryChannel> OtpService<D, S, C> {
    /// Create a new verification service with the secure generator and the
    /// system clock
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` when the code length is out of
    /// range or the TTL is not positive.
    pub fn new(
        directory: Arc<D>,
        store: Arc<S>,
        channel: Arc<C>,
        config: OtpServiceConfig,
    ) -> DomainResult<Self> {
        if config.ttl <= chrono::Duration::zero() {
            return Err(DomainError::Configuration {
                message: "passcode lifetime must be positive".to_string(),
            });
        }
        if SystemClock.now().checked_add_signed(config.ttl).is_none() {
            return Err(DomainError::Configuration {
                message: "passcode lifetime is too large".to_string(),
            });
        }
        let generator = SecureCodeGenerator::new(config.code_length)?;

        Ok(Self {
            directory,
            store,
            channel,
            config,
            generator: Arc::new(generator),
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the passcode generator
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Service configuration
    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Name of the delivery provider in use
    pub fn provider_name(&self) -> &str {
        self.channel.provider_name()
    }

    /// Issue a fresh passcode to a registered subject
    ///
    /// This method:
    /// 1. Resolves the subject's delivery target
    /// 2. Generates a new passcode
    /// 3. Stores it, superseding any pending one
    /// 4. Sends it through the delivery channel
    ///
    /// The stored record is kept when delivery fails, so a passcode that did
    /// arrive despite a reported failure still verifies.
    ///
    /// # Errors
    ///
    /// * `DomainError::SubjectNotRegistered` - no delivery target is known;
    ///   nothing is generated, stored or sent
    /// * `DomainError::DeliveryFailed` - the channel rejected the message
    pub async fn issue_otp(&self, subject: &Subject) -> DomainResult<IssuedOtp> {
        let target = match self.directory.resolve(subject).await {
            Some(target) => target,
            None => {
                tracing::warn!(
                    subject = %subject,
                    event = "otp_subject_not_registered",
                    "Passcode requested for unregistered subject"
                );
                return Err(DomainError::SubjectNotRegistered {
                    subject: subject.as_str().to_string(),
                });
            }
        };

        let code = self.generator.generate();
        let now = self.clock.now();
        let record = self.store.put(subject, &code, now, self.config.ttl).await;

        tracing::info!(
            subject = %subject,
            expires_at = %record.expires_at,
            valid_for_secs = record.time_until_expiration(now).num_seconds(),
            event = "otp_generated",
            "Generated new passcode"
        );

        let message = format!(
            "Your OTP is: {}. It expires in {} minutes.",
            code,
            self.config.ttl_minutes()
        );

        let message_id = self.channel.send(&target, &message).await.map_err(|e| {
            tracing::error!(
                subject = %subject,
                provider = self.channel.provider_name(),
                error = %e,
                event = "otp_delivery_failed",
                "Failed to deliver passcode"
            );
            DomainError::from(e)
        })?;

        tracing::info!(
            subject = %subject,
            provider = self.channel.provider_name(),
            message_id = %message_id,
            event = "otp_sent",
            "Passcode delivered"
        );

        Ok(IssuedOtp {
            subject: subject.clone(),
            issued_at: record.issued_at,
            expires_at: record.expires_at,
            message_id,
        })
    }

    /// Check a submitted passcode
    ///
    /// A match consumes the record; an expired record is purged. Unknown
    /// subjects and wrong codes are both reported as `Invalid`.
    pub async fn verify_otp(&self, subject: &Subject, candidate: &str) -> VerifyOutcome {
        let now = self.clock.now();
        let consumed = self.store.try_consume(subject, candidate, now).await;
        let outcome = VerifyOutcome::from(consumed);

        match outcome {
            VerifyOutcome::Verified => tracing::info!(
                subject = %subject,
                event = "otp_verified",
                "Passcode verified"
            ),
            VerifyOutcome::Expired => tracing::info!(
                subject = %subject,
                event = "otp_expired",
                "Expired passcode presented"
            ),
            VerifyOutcome::Invalid => tracing::warn!(
                subject = %subject,
                pending = consumed != ConsumeOutcome::NotFound,
                event = "otp_invalid",
                "Invalid passcode presented"
            ),
        }

        outcome
    }

    /// Drop every pending record that has expired, returning the count
    pub async fn purge_expired(&self) -> usize {
        let removed = self.store.purge_expired(self.clock.now()).await;
        if removed > 0 {
            tracing::debug!(removed = removed, event = "otp_purged", "Purged expired passcodes");
        }
        removed
    }

    /// Number of passcodes awaiting verification
    pub async fn pending_count(&self) -> usize {
        self.store.pending_count().await
    }
}
