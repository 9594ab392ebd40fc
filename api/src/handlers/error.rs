//! Mapping of domain results to HTTP responses
//!
//! | Result                         | Status | Body reason            |
//! |--------------------------------|--------|------------------------|
//! | `SubjectNotRegistered`         | 400    | `phone_not_registered` |
//! | `DeliveryFailed`               | 500    | `telegram_send_failed` |
//! | bad or incomplete JSON body    | 400    | `invalid_request`      |
//! | `Configuration`                | 500    | `internal_error`       |
//! | `VerifyOutcome::Verified`      | 200    | (status `verified`)    |
//! | `VerifyOutcome::Expired`       | 200    | `otp_expired`          |
//! | `VerifyOutcome::Invalid`       | 200    | `otp_invalid`          |

use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};

use tg_core::errors::DomainError;
use tg_core::services::verification::VerifyOutcome;
use tg_shared::reason_codes;
use tg_shared::types::StatusResponse;

/// Convert a domain error into its HTTP response
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::SubjectNotRegistered { .. } => {
            HttpResponse::BadRequest().json(StatusResponse::error(reason_codes::PHONE_NOT_REGISTERED))
        }
        DomainError::DeliveryFailed { reason } => HttpResponse::InternalServerError().json(
            StatusResponse::error(reason_codes::TELEGRAM_SEND_FAILED).with_details(reason.as_str()),
        ),
        DomainError::Configuration { message } => {
            log::error!("Configuration error surfaced on a request: {}", message);
            HttpResponse::InternalServerError().json(StatusResponse::error(reason_codes::INTERNAL_ERROR))
        }
    }
}

/// Every verification outcome is answered with 200
pub fn verify_outcome_response(outcome: VerifyOutcome) -> HttpResponse {
    let body = match outcome {
        VerifyOutcome::Verified => StatusResponse::ok("verified"),
        VerifyOutcome::Expired => StatusResponse::error(reason_codes::OTP_EXPIRED),
        VerifyOutcome::Invalid => StatusResponse::error(reason_codes::OTP_INVALID),
    };
    HttpResponse::Ok().json(body)
}

/// JSON extractor error handler producing the standard error body
pub fn json_error_handler(error: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected malformed JSON body on {}: {}", req.path(), error);
    let details = error.to_string();
    let response = HttpResponse::BadRequest()
        .json(StatusResponse::error(reason_codes::INVALID_REQUEST).with_details(details));
    actix_web::error::InternalError::from_response(error, response).into()
}
