//! In-memory identity directory
//!
//! Maps subjects (phone numbers) to Telegram chat ids. Lookups are exact:
//! the subject presented at request time must match the registered string.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{info, warn};

use tg_core::domain::value_objects::{DeliveryTarget, Subject};
use tg_core::services::verification::IdentityDirectory;
use tg_shared::config::DirectoryConfig;
use tg_shared::utils::phone::is_valid_international_phone;

/// Directory backed by a read-mostly map
#[derive(Default)]
pub struct InMemoryDirectory {
    entries: RwLock<HashMap<Subject, DeliveryTarget>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory seeded with the configured registrations
    pub fn from_config(config: &DirectoryConfig) -> Self {
        let directory = Self::new();
        for registration in &config.registrations {
            directory.register(
                Subject::new(registration.subject.as_str()),
                DeliveryTarget::new(registration.target.as_str()),
            );
        }
        info!(
            registrations = directory.len(),
            "Identity directory seeded from configuration"
        );
        directory
    }

    /// Bind `subject` to `target`, returning the previous target if any
    pub fn register(&self, subject: Subject, target: DeliveryTarget) -> Option<DeliveryTarget> {
        if !is_valid_international_phone(subject.as_str()) {
            warn!(
                subject = %subject,
                "Registering subject that is not an E.164 phone number"
            );
        }
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(subject, target)
    }

    /// Remove a binding
    pub fn unregister(&self, subject: &Subject) -> Option<DeliveryTarget> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(subject)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn resolve(&self, subject: &Subject) -> Option<DeliveryTarget> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(subject)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tg_shared::config::Registration;

    #[tokio::test]
    async fn test_register_and_resolve() {
        let directory = InMemoryDirectory::new();
        assert!(directory.is_empty());

        let previous = directory.register(Subject::new("+918434237052"), DeliveryTarget::from(7844936105));
        assert!(previous.is_none());

        let target = directory.resolve(&Subject::new("+918434237052")).await.unwrap();
        assert_eq!(target.as_str(), "7844936105");
        assert!(directory.resolve(&Subject::new("918434237052")).await.is_none());
    }

    #[tokio::test]
    async fn test_reregister_replaces_target() {
        let directory = InMemoryDirectory::new();
        directory.register(Subject::new("S1"), DeliveryTarget::new("T1"));
        let previous = directory.register(Subject::new("S1"), DeliveryTarget::new("T2"));

        assert_eq!(previous, Some(DeliveryTarget::new("T1")));
        assert_eq!(
            directory.resolve(&Subject::new("S1")).await,
            Some(DeliveryTarget::new("T2"))
        );
        assert_eq!(directory.len(), 1);
    }

    #[tokio::test]
    async fn test_unregister() {
        let directory = InMemoryDirectory::new();
        directory.register(Subject::new("S1"), DeliveryTarget::new("T1"));
        assert!(directory.unregister(&Subject::new("S1")).is_some());
        assert!(directory.resolve(&Subject::new("S1")).await.is_none());
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = DirectoryConfig {
            registrations: vec![
                Registration {
                    subject: "+14155552671".to_string(),
                    target: "42".to_string(),
                },
                Registration {
                    subject: "+918434237052".to_string(),
                    target: "7844936105".to_string(),
                },
            ],
        };

        let directory = InMemoryDirectory::from_config(&config);
        assert_eq!(directory.len(), 2);
        assert_eq!(
            directory.resolve(&Subject::new("+14155552671")).await,
            Some(DeliveryTarget::new("42"))
        );
    }
}
