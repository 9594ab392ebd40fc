//! One-time passcode configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;

use super::ConfigValidationError;

/// Shortest passcode accepted by the generator
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest passcode accepted by the generator
pub const MAX_CODE_LENGTH: usize = 10;

/// Default number of digits in a passcode
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default passcode lifetime (5 minutes)
pub const DEFAULT_TTL_MINUTES: u64 = 5;

/// Longest accepted passcode lifetime (one year)
pub const MAX_TTL_MINUTES: u64 = 365 * 24 * 60;

/// Passcode generation and lifetime settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of digits in each passcode
    pub code_length: usize,

    /// Minutes a passcode stays valid after issuance
    pub ttl_minutes: u64,

    /// Seconds between sweeps of expired passcodes (0 disables the sweeper)
    pub sweep_interval_secs: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            ttl_minutes: DEFAULT_TTL_MINUTES,
            sweep_interval_secs: 60,
        }
    }
}

impl OtpConfig {
    /// Load from `OTP_CODE_LENGTH`, `OTP_TTL_MINUTES` and `OTP_SWEEP_INTERVAL_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_length: env::var("OTP_CODE_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_length),
            ttl_minutes: env::var("OTP_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_minutes),
            sweep_interval_secs: env::var("OTP_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval_secs),
        }
    }

    /// Passcode lifetime as a chrono duration, capped at [`MAX_TTL_MINUTES`]
    pub fn ttl(&self) -> Duration {
        // The cap fits in i64 so the cast is lossless
        Duration::minutes(self.ttl_minutes.min(MAX_TTL_MINUTES) as i64)
    }

    /// Check length range and lifetime
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(ConfigValidationError::CodeLength {
                min: MIN_CODE_LENGTH,
                max: MAX_CODE_LENGTH,
                actual: self.code_length,
            });
        }
        if self.ttl_minutes == 0 {
            return Err(ConfigValidationError::ZeroTtl);
        }
        if self.ttl_minutes > MAX_TTL_MINUTES {
            return Err(ConfigValidationError::TtlTooLarge {
                max: MAX_TTL_MINUTES,
                actual: self.ttl_minutes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.ttl(), Duration::minutes(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_code_length_bounds() {
        let mut config = OtpConfig::default();
        config.code_length = 3;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::CodeLength { actual: 3, .. })
        ));

        config.code_length = 10;
        assert!(config.validate().is_ok());

        config.code_length = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ttl_upper_bound() {
        let mut config = OtpConfig::default();
        config.ttl_minutes = MAX_TTL_MINUTES;
        assert!(config.validate().is_ok());
        assert_eq!(config.ttl(), Duration::days(365));

        config.ttl_minutes = 1_000_000_000_000;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::TtlTooLarge {
                max: MAX_TTL_MINUTES,
                actual: 1_000_000_000_000,
            })
        );
        assert_eq!(config.ttl(), Duration::days(365));

        config.ttl_minutes = u64::MAX;
        assert!(config.validate().is_err());
        assert_eq!(config.ttl(), Duration::days(365));
    }
}
