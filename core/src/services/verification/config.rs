//! Configuration for the verification service

use chrono::Duration;

use tg_shared::config::otp::{OtpConfig, DEFAULT_CODE_LENGTH, DEFAULT_TTL_MINUTES};

/// Configuration for the verification service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpServiceConfig {
    /// Number of digits in each passcode
    pub code_length: usize,
    /// How long an issued passcode stays valid
    pub ttl: Duration,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            ttl: Duration::minutes(DEFAULT_TTL_MINUTES as i64),
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            ttl: config.ttl(),
        }
    }
}

impl OtpServiceConfig {
    /// Lifetime in whole minutes, as quoted in the delivered message
    pub fn ttl_minutes(&self) -> i64 {
        self.ttl.num_minutes()
    }
}
