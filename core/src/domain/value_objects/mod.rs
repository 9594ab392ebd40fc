//! Value objects identifying who a passcode is for and where it goes.

pub mod identity;

pub use identity::{DeliveryTarget, Subject};
