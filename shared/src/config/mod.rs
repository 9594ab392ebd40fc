//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `directory` - Identity directory seeding
//! - `environment` - Environment detection
//! - `otp` - Passcode length, lifetime and sweeping
//! - `server` - HTTP server binding
//! - `telegram` - Telegram Bot API access and delivery provider selection

pub mod directory;
pub mod environment;
pub mod otp;
pub mod server;
pub mod telegram;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use directory::{DirectoryConfig, Registration};
pub use environment::Environment;
pub use otp::OtpConfig;
pub use server::ServerConfig;
pub use telegram::{DeliveryConfig, DeliveryProvider, TelegramConfig};

/// Configuration problems detected at startup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("otp.code_length must be between {min} and {max}, got {actual}")]
    CodeLength { min: usize, max: usize, actual: usize },

    #[error("otp.ttl_minutes must be greater than zero")]
    ZeroTtl,

    #[error("otp.ttl_minutes must be at most {max}, got {actual}")]
    TtlTooLarge { max: u64, actual: u64 },

    #[error("telegram.bot_token is required when the telegram delivery provider or polling is enabled")]
    MissingBotToken,

    #[error("directory registration #{index} has an empty subject or target")]
    EmptyRegistration { index: usize },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Passcode configuration
    pub otp: OtpConfig,

    /// Telegram Bot API configuration
    pub telegram: TelegramConfig,

    /// Delivery channel selection
    pub delivery: DeliveryConfig,

    /// Identity directory seeding
    pub directory: DirectoryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            otp: OtpConfig::from_env(),
            telegram: TelegramConfig::from_env(),
            delivery: DeliveryConfig::from_env(),
            directory: DirectoryConfig::from_env(),
        }
    }

    /// Check the cross-section invariants that must hold before startup
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.otp.validate()?;

        let needs_token =
            self.delivery.provider == DeliveryProvider::Telegram || self.telegram.polling_enabled;
        if needs_token && self.telegram.bot_token.trim().is_empty() {
            return Err(ConfigValidationError::MissingBotToken);
        }

        self.directory.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.delivery.provider = DeliveryProvider::Mock;
        config.telegram.polling_enabled = false;
        config
    }

    #[test]
    fn test_default_mock_config_is_valid() {
        assert_eq!(mock_config().validate(), Ok(()));
    }

    #[test]
    fn test_telegram_provider_requires_token() {
        let mut config = mock_config();
        config.delivery.provider = DeliveryProvider::Telegram;
        config.telegram.bot_token = "   ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingBotToken));

        config.telegram.bot_token = "123:abc".to_string();
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_polling_requires_token() {
        let mut config = mock_config();
        config.telegram.polling_enabled = true;
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingBotToken));
    }

    #[test]
    fn test_invalid_otp_section_is_reported() {
        let mut config = mock_config();
        config.otp.ttl_minutes = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroTtl));
    }

    #[test]
    fn test_deserialize_partial_toml_like_json() {
        let config: AppConfig = serde_json::from_str(
            r#"{"server": {"port": 9000}, "otp": {"ttl_minutes": 10}}"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.otp.ttl_minutes, 10);
        assert_eq!(config.otp.code_length, 6);
    }
}
