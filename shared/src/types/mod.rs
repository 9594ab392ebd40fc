//! Type definitions shared by the API layer
//!
//! - `response` - Status bodies and health checks

pub mod response;

pub use response::{HealthResponse, StatusResponse};
