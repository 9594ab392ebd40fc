use serde::{Deserialize, Serialize};

/// Body of `POST /send_otp`
///
/// Field contents are not checked here: an empty or unknown subject is
/// answered as unregistered by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpRequest {
    /// Registered subject, usually an E.164 phone number
    /// Also accepted as `subject`
    #[serde(alias = "subject")]
    pub phone: String,
}

/// Body of `POST /verify_otp`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(alias = "subject")]
    pub phone: String,

    /// Passcode as received, any length; also accepted as `code`
    #[serde(alias = "code")]
    pub otp: String,
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub status: String,
    pub message: String,
    pub available_endpoints: Vec<String>,
}

impl Default for IndexResponse {
    fn default() -> Self {
        Self {
            status: "running".to_string(),
            message: "Telegram OTP API is live!".to_string(),
            available_endpoints: vec!["/send_otp".to_string(), "/verify_otp".to_string()],
        }
    }
}
