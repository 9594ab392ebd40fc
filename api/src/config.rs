//! Layered configuration loading
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults and the plain environment variables (`PORT`, `BOT_TOKEN`, ...)
//! 2. an optional TOML file: `TELEOTP_CONFIG`, or `config.<environment>.toml`
//! 3. `TELEOTP_`-prefixed variables with `__` between sections,
//!    e.g. `TELEOTP_OTP__TTL_MINUTES=10`

use std::env;

use ::config::{Config, Environment as EnvSource, File};
use thiserror::Error;

use tg_shared::config::{AppConfig, ConfigValidationError};

/// Prefix for layered environment overrides
pub const ENV_PREFIX: &str = "TELEOTP";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),
}

/// Load and validate the application configuration
pub fn load() -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::from_env();
    let path = env::var(format!("{}_CONFIG", ENV_PREFIX))
        .unwrap_or_else(|_| defaults.environment.config_file().to_string());
    load_from(defaults, &path)
}

/// Layer `path` and `TELEOTP_*` overrides on top of `defaults`
pub fn load_from(defaults: AppConfig, path: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(path).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tg_shared::config::DeliveryProvider;

    fn mock_defaults() -> AppConfig {
        let mut config = AppConfig::default();
        config.delivery.provider = DeliveryProvider::Mock;
        config.telegram.polling_enabled = false;
        config
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let config = load_from(mock_defaults(), "does-not-exist.toml").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.otp.ttl_minutes, 5);
        assert_eq!(config.otp.code_length, 6);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = env::temp_dir().join(format!("teleotp-config-{}.toml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9100

[otp]
ttl_minutes = 10
code_length = 8

[[directory.registrations]]
subject = "+918434237052"
target = "7844936105"
"#
        )
        .unwrap();

        let config = load_from(mock_defaults(), path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.otp.ttl_minutes, 10);
        assert_eq!(config.otp.code_length, 8);
        assert_eq!(config.directory.registrations.len(), 1);
        assert_eq!(config.delivery.provider, DeliveryProvider::Mock);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut defaults = mock_defaults();
        defaults.otp.code_length = 2;
        match load_from(defaults, "does-not-exist.toml") {
            Err(ConfigError::Invalid(ConfigValidationError::CodeLength { actual, .. })) => {
                assert_eq!(actual, 2)
            }
            other => panic!("expected code length error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_telegram_provider_without_token_is_rejected() {
        let mut defaults = mock_defaults();
        defaults.delivery.provider = DeliveryProvider::Telegram;
        defaults.telegram.bot_token.clear();
        assert!(matches!(
            load_from(defaults, "does-not-exist.toml"),
            Err(ConfigError::Invalid(ConfigValidationError::MissingBotToken))
        ));
    }
}
