use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use pv_api::app::create_app;
use pv_api::middleware::RateLimiter;
use pv_api::routes::otp::AppState;
use pv_core::services::{OtpService, OtpServiceConfig};
use pv_infra::{create_sms_service, MemoryOtpStore};
use pv_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting PhoneVerify API Server");

    // Load configuration
    let config = AppConfig::from_env().context("invalid configuration")?;
    config.validate().context("invalid configuration")?;
    info!("Environment: {}", config.environment);

    // Collaborators
    let sms_service = create_sms_service(&config.sms, config.environment)
        .context("failed to initialise SMS provider")?;
    let store = Arc::new(MemoryOtpStore::with_shards(config.otp.store_shards));
    let _sweeper = store.spawn_sweeper(
        Duration::from_secs(config.otp.expiry_seconds),
        Duration::from_secs(config.otp.sweep_interval_seconds),
    );

    let otp_service = Arc::new(OtpService::new(
        Arc::new(sms_service),
        store,
        OtpServiceConfig::from_app_config(&config.otp, &config.sms),
    ));
    let app_state = web::Data::new(AppState::new(otp_service));
    let rate_limiter = RateLimiter::new(config.rate_limit.clone());

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let workers = config.server.workers;
    let app_config = config.clone();
    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), rate_limiter.clone(), &app_config)
    });
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}
