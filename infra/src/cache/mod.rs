//! Cache module for pending passcode storage
//!
//! Passcodes live only in process memory; a restart invalidates every
//! pending code.

pub mod otp_store;


pub use otp_store::{ShardedOtpStore, DEFAULT_SHARD_COUNT};
