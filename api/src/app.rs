//! Application state and factory
//!
//! This module provides the factory for creating the Actix-web application
//! with its routes and middleware stack.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Compress, Logger},
    web, App, HttpResponse,
};

use pv_core::services::{OtpStoreTrait, SmsServiceTrait};
use pv_shared::config::AppConfig;
use pv_shared::types::{HealthResponse, OtpResponse};

use crate::handlers::json_error_handler;
use crate::middleware::{cors::create_cors, rate_limit::RateLimiter, security::SecurityMiddleware};
use crate::routes::otp::{request_otp::request_otp, verify_otp::verify_otp, AppState};

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "phone-verify-api";

/// Create and configure the application with all dependencies
///
/// `rate_limiter` is cloned into every worker, so build it once outside the
/// `HttpServer` factory closure to share counters between workers.
pub fn create_app<S, C>(
    app_state: web::Data<AppState<S, C>>,
    rate_limiter: RateLimiter,
    config: &AppConfig,
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
    S: SmsServiceTrait + 'static,
    C: OtpStoreTrait + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(json_config)
        // Add middleware (last wrapped runs first)
        .wrap(Compress::default())
        .wrap(create_cors(&config.cors, config.environment))
        .wrap(SecurityMiddleware::new(config.environment))
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // OTP routes
        .service(
            web::scope("/api")
                .wrap(rate_limiter)
                .route("/request-otp", web::post().to(request_otp::<S, C>))
                .route("/verify-otp", web::post().to(verify_otp::<S, C>)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(OtpResponse::error("Not found"))
}
