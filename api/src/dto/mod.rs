pub mod otp;

pub use otp::{IndexResponse, SendOtpRequest, VerifyOtpRequest};
