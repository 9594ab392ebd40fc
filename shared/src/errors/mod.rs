//! Reason codes carried in error bodies

/// Reason codes returned in the `reason` field of `{"status": "error"}` bodies
pub mod reason_codes {
    pub const PHONE_NOT_REGISTERED: &str = "phone_not_registered";
    pub const TELEGRAM_SEND_FAILED: &str = "telegram_send_failed";
    pub const OTP_EXPIRED: &str = "otp_expired";
    pub const OTP_INVALID: &str = "otp_invalid";
    pub const INVALID_REQUEST: &str = "invalid_request";
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL_ERROR: &str = "internal_error";
}
