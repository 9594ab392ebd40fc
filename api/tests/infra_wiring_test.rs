//! End-to-end test of the facade over the in-memory infrastructure

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};

use tg_api::app::create_app;
use tg_api::routes::otp::AppState;
use tg_core::services::verification::mock::FixedCodeGenerator;
use tg_core::services::verification::{OtpService, OtpServiceConfig};
use tg_infra::{InMemoryDirectory, MockDeliveryChannel, ShardedOtpStore};
use tg_shared::config::{DirectoryConfig, Environment, Registration};

#[actix_web::test]
async fn test_facade_over_in_memory_infrastructure() {
    let directory = Arc::new(InMemoryDirectory::from_config(&DirectoryConfig {
        registrations: vec![Registration {
            subject: "+918434237052".to_string(),
            target: "7844936105".to_string(),
        }],
    }));
    let store = Arc::new(ShardedOtpStore::new());
    let channel = Arc::new(MockDeliveryChannel::with_options(false, false));

    let otp_service = OtpService::new(
        directory,
        store.clone(),
        channel.clone(),
        OtpServiceConfig::default(),
    )
    .unwrap()
    .with_generator(Arc::new(FixedCodeGenerator::new(["764215"])));

    let state = web::Data::new(AppState {
        otp_service: Arc::new(otp_service),
    });
    let app = test::init_service(create_app(state, Environment::Production)).await;

    let req = test::TestRequest::post()
        .uri("/send_otp")
        .set_json(json!({"phone": "+918434237052"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(channel.get_message_count(), 1);

    let req = test::TestRequest::post()
        .uri("/verify_otp")
        .set_json(json!({"phone": "+918434237052", "otp": "764215"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"status": "verified"}));
    assert_eq!(store.get(&"+918434237052".into()), None);
}
