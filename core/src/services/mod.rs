//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    Clock, CodeGenerator, DeliveryChannel, IdentityDirectory, IssuedOtp, OtpService,
    OtpServiceConfig, OtpStore, SecureCodeGenerator, SystemClock, VerifyOutcome,
};
