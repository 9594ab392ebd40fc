//! # Infrastructure Layer
//!
//! Concrete implementations of the traits declared in `tg_core`:
//!
//! - **Cache**: sharded in-memory OTP store
//! - **Directory**: in-memory subject → Telegram chat id registry
//! - **Telegram**: Bot API client, delivery channel and inbound update listener
//! - **Delivery**: mock delivery channel for development

/// Cache module - in-memory OTP storage
pub mod cache;

/// Identity directory module
pub mod directory;

/// Delivery channel module - mock provider
pub mod delivery;

/// Telegram Bot API module
pub mod telegram;

pub use cache::ShardedOtpStore;
pub use delivery::MockDeliveryChannel;
pub use directory::InMemoryDirectory;
pub use telegram::{BotListener, TelegramClient, TelegramDeliveryChannel};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered with `ok: false`
    #[error("Telegram API error: {description}")]
    Telegram { description: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for tg_core::DeliveryError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Telegram { description } => tg_core::DeliveryError::new(description),
            other => tg_core::DeliveryError::new(other.to_string()),
        }
    }
}
