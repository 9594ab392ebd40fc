use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::VerifyOtpRequest;
use crate::handlers::verify_outcome_response;

use tg_core::domain::value_objects::Subject;
use tg_core::services::verification::{DeliveryChannel, IdentityDirectory, OtpStore};

use super::AppState;

/// Handler for POST /verify_otp
///
/// Always answers 200 once the body parses; the outcome is in the
/// body: `{"status": "verified"}` or `{"status": "error", "reason":
/// "otp_expired" | "otp_invalid"}`.
pub async fn verify_otp<D, S, C>(
    state: web::Data<AppState<D, S, C>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    D: IdentityDirectory + 'static,
    S: OtpStore + 'static,
    C: DeliveryChannel + 'static,
{
    let request_id = Uuid::new_v4();
    let request = request.into_inner();

    let subject = Subject::new(request.phone);
    let outcome = state.otp_service.verify_otp(&subject, &request.otp).await;
    if outcome.is_verified() {
        log::info!("[{}] verify_otp for {}: {}", request_id, subject, outcome);
    } else {
        log::warn!("[{}] verify_otp for {}: {}", request_id, subject, outcome);
    }

    verify_outcome_response(outcome)
}
