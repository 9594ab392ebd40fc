//! Verification service module for passcode-based authentication
//!
//! This module provides the complete passcode workflow:
//! - Identity lookup and passcode generation
//! - Time-bounded storage with single-use consumption
//! - Dispatch through a delivery channel
//! - Verification with expiry and match checks

mod clock;
mod config;
mod generator;
pub mod mock;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{Clock, SystemClock};
pub use config::OtpServiceConfig;
pub use generator::SecureCodeGenerator;
pub use service::OtpService;
pub use traits::{CodeGenerator, DeliveryChannel, IdentityDirectory, OtpStore};
pub use types::{IssuedOtp, VerifyOutcome};
