//! Passcode route handlers
//!
//! - `POST /send_otp` issues a passcode to a registered subject
//! - `POST /verify_otp` checks a submitted passcode

pub mod send_otp;
pub mod verify_otp;

pub use send_otp::AppState;
