//! # TeleOTP Core
//!
//! Core passcode lifecycle and domain layer for the TeleOTP backend.
//! This crate contains domain entities, the error taxonomy, the traits the
//! infrastructure layer implements, and the verification engine that drives
//! issuance and single-use verification of one-time passcodes.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
