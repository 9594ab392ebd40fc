//! CORS middleware configuration for cross-origin requests.
//!
//! Development allows any origin so the endpoints can be exercised from a
//! browser or emulator. Production only allows the origins listed in
//! `ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

use tg_shared::config::Environment;

/// Creates a CORS middleware instance configured for `environment`.
///
/// # Environment Variables
/// - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (production only)
/// - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)
pub fn create_cors(environment: Environment) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(3600);

    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
        ])
        .max_age(max_age);

    if !environment.is_production() {
        log::info!("Configuring permissive CORS for {} environment", environment);
        return cors.allow_any_origin();
    }

    log::info!("Configuring CORS for production environment");
    allowed_origins(env::var("ALLOWED_ORIGINS").ok().as_deref())
        .into_iter()
        .fold(cors, |cors, origin| {
            log::info!("Adding allowed origin: {}", origin);
            cors.allowed_origin(&origin)
        })
}

fn allowed_origins(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
