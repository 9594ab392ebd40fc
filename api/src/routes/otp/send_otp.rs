use actix_web::{web, HttpResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::SendOtpRequest;
use crate::handlers::domain_error_response;

use tg_core::domain::value_objects::Subject;
use tg_core::services::verification::{DeliveryChannel, IdentityDirectory, OtpService, OtpStore};
use tg_shared::types::StatusResponse;

/// Application state that holds shared services
pub struct AppState<D, S, C>
where
    D: IdentityDirectory,
    S: OtpStore,
    C: DeliveryChannel,
{
    pub otp_service: Arc<OtpService<D, S, C>>,
}

/// Handler for POST /send_otp
///
/// # Request Body
///
/// ```json
/// { "phone": "+918434237052" }
/// ```
///
/// # Responses
///
/// - 200 `{"status": "sent"}`
/// - 400 `{"status": "error", "reason": "phone_not_registered"}`
/// - 500 `{"status": "error", "reason": "telegram_send_failed", "details": "..."}`
pub async fn send_otp<D, S, C>(
    state: web::Data<AppState<D, S, C>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    D: IdentityDirectory + 'static,
    S: OtpStore + 'static,
    C: DeliveryChannel + 'static,
{
    let request_id = Uuid::new_v4();
    let request = request.into_inner();

    let subject = Subject::new(request.phone);
    log::info!("[{}] Processing send_otp request for subject: {}", request_id, subject);

    match state.otp_service.issue_otp(&subject).await {
        Ok(issued) => {
            log::info!(
                "[{}] Passcode sent to {} (message {}, expires {})",
                request_id,
                subject,
                issued.message_id,
                issued.expires_at.to_rfc3339()
            );
            HttpResponse::Ok().json(StatusResponse::ok("sent"))
        }
        Err(e) => {
            if e.is_transient() {
                log::error!("[{}] send_otp failed for {}: {}", request_id, subject, e);
            } else {
                log::warn!("[{}] send_otp rejected for {}: {}", request_id, subject, e);
            }
            domain_error_response(&e)
        }
    }
}
