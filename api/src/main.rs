use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};

use tg_api::app::create_app;
use tg_api::routes::otp::AppState;
use tg_core::services::verification::{DeliveryChannel, OtpService, OtpServiceConfig};
use tg_infra::{
    BotListener, InMemoryDirectory, MockDeliveryChannel, ShardedOtpStore, TelegramClient,
    TelegramDeliveryChannel,
};
use tg_shared::config::{AppConfig, DeliveryProvider, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger; library crates log through tracing's `log` bridge
    let environment = Environment::from_env();
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(environment.default_log_filter()),
    );

    let config = tg_api::config::load().context("Failed to load configuration")?;
    info!("Starting TeleOTP API Server ({} environment)", config.environment);

    let directory = Arc::new(InMemoryDirectory::from_config(&config.directory));
    let store = Arc::new(ShardedOtpStore::new());

    let telegram = if config.delivery.provider == DeliveryProvider::Telegram
        || config.telegram.polling_enabled
    {
        let client = TelegramClient::new(&config.telegram)
            .context("Failed to initialize Telegram client")?;
        Some(Arc::new(client))
    } else {
        None
    };

    match (config.delivery.provider, &telegram) {
        (DeliveryProvider::Telegram, Some(client)) => {
            let channel = Arc::new(TelegramDeliveryChannel::new(client.clone()));
            serve(config, directory, store, channel, telegram).await
        }
        _ => {
            warn!("Using mock delivery channel; passcodes are printed to the console");
            serve(config, directory, store, Arc::new(MockDeliveryChannel::new()), telegram).await
        }
    }
}

/// Run the HTTP server alongside the Telegram listener and the sweeper
async fn serve<C>(
    config: AppConfig,
    directory: Arc<InMemoryDirectory>,
    store: Arc<ShardedOtpStore>,
    channel: Arc<C>,
    telegram: Option<Arc<TelegramClient>>,
) -> anyhow::Result<()>
where
    C: DeliveryChannel + 'static,
{
    let otp_service = Arc::new(
        OtpService::new(directory, store, channel, OtpServiceConfig::from(&config.otp))
            .context("Failed to initialize passcode service")?,
    );
    info!(
        "Passcodes: {} digits, valid for {} minutes, delivered via {}",
        otp_service.config().code_length,
        otp_service.config().ttl_minutes(),
        otp_service.provider_name()
    );

    let mut tasks = Vec::new();

    if let (true, Some(client)) = (config.telegram.polling_enabled, telegram) {
        match client.get_me().await {
            Ok(me) => info!(
                "Telegram bot @{} authorized",
                me.username.unwrap_or_else(|| me.id.to_string())
            ),
            Err(e) => warn!("Telegram getMe failed, polling anyway: {}", e),
        }
        let listener = BotListener::new(client, config.telegram.poll_timeout_secs);
        tasks.push(actix_web::rt::spawn(listener.run()));
    }

    if config.otp.sweep_interval_secs > 0 {
        let service = otp_service.clone();
        let period = Duration::from_secs(config.otp.sweep_interval_secs);
        tasks.push(actix_web::rt::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                service.purge_expired().await;
            }
        }));
    }

    let state = web::Data::new(AppState { otp_service });
    let environment = config.environment;
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), environment));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await;

    for task in tasks {
        task.abort();
    }
    info!("Server stopped");

    result.context("HTTP server error")
}
