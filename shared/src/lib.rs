//! Shared utilities and common types for the TeleOTP server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Status response bodies and reason codes
//! - Utility functions (phone masking, normalization)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigValidationError, DeliveryConfig, DeliveryProvider, DirectoryConfig,
    Environment, OtpConfig, Registration, ServerConfig, TelegramConfig,
};
pub use errors::reason_codes;
pub use types::{HealthResponse, StatusResponse};
pub use utils::phone;
