//! Telegram Bot API and delivery provider configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Telegram Bot API settings
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub bot_token: String,

    /// Base URL of the Bot API
    pub api_base_url: String,

    /// Whether to run the inbound long-polling listener
    pub polling_enabled: bool,

    /// Long-poll timeout passed to `getUpdates`, in seconds
    pub poll_timeout_secs: u64,

    /// Timeout for outbound API requests, in seconds
    pub request_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_base_url: String::from("https://api.telegram.org"),
            polling_enabled: true,
            poll_timeout_secs: 30,
            request_timeout_secs: 10,
        }
    }
}

// Keeps the bot token out of logs
impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &if self.bot_token.is_empty() { "<unset>" } else { "<redacted>" })
            .field("api_base_url", &self.api_base_url)
            .field("polling_enabled", &self.polling_enabled)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl TelegramConfig {
    /// Load from `BOT_TOKEN`, `TELEGRAM_API_URL`, `TELEGRAM_POLLING`,
    /// `TELEGRAM_POLL_TIMEOUT_SECS` and `TELEGRAM_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bot_token: env::var("BOT_TOKEN").unwrap_or(defaults.bot_token),
            api_base_url: env::var("TELEGRAM_API_URL").unwrap_or(defaults.api_base_url),
            polling_enabled: env::var("TELEGRAM_POLLING")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.polling_enabled),
            poll_timeout_secs: env::var("TELEGRAM_POLL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.poll_timeout_secs),
            request_timeout_secs: env::var("TELEGRAM_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}

/// Which delivery channel the server sends passcodes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryProvider {
    /// Telegram Bot API `sendMessage`
    Telegram,
    /// Console output for development
    Mock,
}

impl std::str::FromStr for DeliveryProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "telegram" => Ok(DeliveryProvider::Telegram),
            "mock" => Ok(DeliveryProvider::Mock),
            _ => Err(format!("Invalid delivery provider: {}", s)),
        }
    }
}

/// Delivery channel selection
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Provider used for outbound passcodes
    pub provider: DeliveryProvider,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            provider: DeliveryProvider::Telegram,
        }
    }
}

impl DeliveryConfig {
    /// Load from `DELIVERY_PROVIDER`
    pub fn from_env() -> Self {
        Self {
            provider: env::var("DELIVERY_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DeliveryProvider::Telegram),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
