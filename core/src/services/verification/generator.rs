//! Cryptographically secure passcode generation

use rand::{rngs::OsRng, Rng};

use tg_shared::config::otp::{MAX_CODE_LENGTH, MIN_CODE_LENGTH};

use crate::errors::{DomainError, DomainResult};

use super::traits::CodeGenerator;

/// Generates fixed-length numeric passcodes from the OS CSPRNG
///
/// Each digit is drawn independently and uniformly from `0..10`, so every
/// code of the configured length is equally likely (leading zeros included).
#[derive(Debug, Clone, Copy)]
pub struct SecureCodeGenerator {
    length: usize,
}

impl SecureCodeGenerator {
    /// Create a generator for codes of `length` digits
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if `length` is outside
    /// `MIN_CODE_LENGTH..=MAX_CODE_LENGTH`.
    pub fn new(length: usize) -> DomainResult<Self> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
            return Err(DomainError::Configuration {
                message: format!(
                    "code length must be between {} and {}, got {}",
                    MIN_CODE_LENGTH, MAX_CODE_LENGTH, length
                ),
            });
        }
        Ok(Self { length })
    }
}

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = OsRng;
        (0..self.length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    fn code_length(&self) -> usize {
        self.length
    }
}
