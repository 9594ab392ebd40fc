//! Integration tests for the verification service through the public API

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    use tg_core::services::verification::mock::{
        FixedCodeGenerator, ManualClock, MockOtpStore, RecordingDeliveryChannel,
    };
    use tg_core::{
        DeliveryTarget, DomainError, IdentityDirectory, OtpService, OtpServiceConfig, Subject,
        VerifyOutcome,
    };

    // Directory that is registered into after the service is built
    #[derive(Default)]
    struct LateBindingDirectory {
        entries: Mutex<HashMap<String, i64>>,
    }

    impl LateBindingDirectory {
        fn register(&self, phone: &str, chat_id: i64) {
            self.entries.lock().unwrap().insert(phone.to_string(), chat_id);
        }
    }

    #[async_trait]
    impl IdentityDirectory for LateBindingDirectory {
        async fn resolve(&self, subject: &Subject) -> Option<DeliveryTarget> {
            self.entries
                .lock()
                .unwrap()
                .get(subject.as_str())
                .map(|&chat_id| DeliveryTarget::from(chat_id))
        }
    }

    #[tokio::test]
    async fn test_full_lifecycle_with_registration() {
        let directory = Arc::new(LateBindingDirectory::default());
        let channel = Arc::new(RecordingDeliveryChannel::new());
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()));

        let service = OtpService::new(
            directory.clone(),
            Arc::new(MockOtpStore::new()),
            channel.clone(),
            OtpServiceConfig::default(),
        )
        .unwrap()
        .with_generator(Arc::new(FixedCodeGenerator::new(["654321", "123456"])))
        .with_clock(clock.clone());

        let phone = Subject::new("+918434237052");

        // Not yet registered
        let err = service.issue_otp(&phone).await.unwrap_err();
        assert!(matches!(err, DomainError::SubjectNotRegistered { .. }));
        assert_eq!(service.pending_count().await, 0);

        directory.register("+918434237052", 123456789);

        service.issue_otp(&phone).await.unwrap();
        let message = channel
            .last_message_to(&DeliveryTarget::new("123456789"))
            .unwrap();
        assert!(message.contains("654321"));

        // Wrong code, retry allowed
        clock.advance(Duration::seconds(30));
        assert_eq!(service.verify_otp(&phone, "000000").await, VerifyOutcome::Invalid);
        assert_eq!(service.verify_otp(&phone, "654321").await, VerifyOutcome::Verified);

        // Second round expires
        service.issue_otp(&phone).await.unwrap();
        clock.advance(Duration::minutes(5) + Duration::seconds(1));
        assert_eq!(service.verify_otp(&phone, "123456").await, VerifyOutcome::Expired);
        assert_eq!(service.verify_otp(&phone, "123456").await, VerifyOutcome::Invalid);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_independent_subjects_do_not_interfere() {
        let directory = Arc::new(LateBindingDirectory::default());
        for i in 0..20 {
            directory.register(&format!("+1555000{:04}", i), 1000 + i);
        }

        let service = Arc::new(
            OtpService::new(
                directory,
                Arc::new(MockOtpStore::new()),
                Arc::new(RecordingDeliveryChannel::new()),
                OtpServiceConfig::default(),
            )
            .unwrap()
            .with_generator(Arc::new(FixedCodeGenerator::new(["777777"]))),
        );

        let mut handles = Vec::new();
        for i in 0..20 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let subject = Subject::new(format!("+1555000{:04}", i));
                service.issue_otp(&subject).await.unwrap();
                service.verify_otp(&subject, "777777").await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), VerifyOutcome::Verified);
        }
        assert_eq!(service.pending_count().await, 0);
    }
}
