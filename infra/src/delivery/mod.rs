//! Delivery channel module
//!
//! The production channel lives in [`crate::telegram`]; this module holds the
//! console-backed mock used in development.

pub mod mock;


pub use mock::MockDeliveryChannel;
