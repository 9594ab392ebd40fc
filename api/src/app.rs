//! Application state and factory
//!
//! This module provides the factory for creating the Actix-web application
//! around a shared [`AppState`].

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, HttpResponse,
};

use crate::dto::IndexResponse;
use crate::handlers::json_error_handler;
use crate::middleware::create_cors;
use crate::routes::otp::{send_otp::send_otp, verify_otp::verify_otp, AppState};

use tg_core::services::verification::{DeliveryChannel, IdentityDirectory, OtpStore};
use tg_shared::config::Environment;
use tg_shared::reason_codes;
use tg_shared::types::{HealthResponse, StatusResponse};

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "teleotp-api";

/// Register routes, JSON error handling and the 404 fallback
pub fn configure<D, S, C>(cfg: &mut web::ServiceConfig)
where
    D: IdentityDirectory + 'static,
    S: OtpStore + 'static,
    C: DeliveryChannel + 'static,
{
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/send_otp", web::post().to(send_otp::<D, S, C>))
        .route("/verify_otp", web::post().to(verify_otp::<D, S, C>))
        .default_service(web::route().to(not_found));
}

/// Create and configure the application with all dependencies
pub fn create_app<D, S, C>(
    app_state: web::Data<AppState<D, S, C>>,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    D: IdentityDirectory + 'static,
    S: OtpStore + 'static,
    C: DeliveryChannel + 'static,
{
    App::new()
        .app_data(app_state)
        .wrap(create_cors(environment))
        .wrap(Logger::default())
        .configure(configure::<D, S, C>)
}

/// Liveness endpoint listing the passcode routes
async fn index() -> HttpResponse {
    HttpResponse::Ok().json(IndexResponse::default())
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(StatusResponse::error(reason_codes::NOT_FOUND))
}
