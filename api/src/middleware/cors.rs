//! CORS middleware configuration for cross-origin requests.
//!
//! The configuration is environment-aware: development accepts any origin,
//! production accepts only the origins listed in `ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use pv_shared::config::{CorsConfig, Environment};

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    if environment.is_production() {
        create_production_cors(config)
    } else {
        create_development_cors(config)
    }
}

fn base_cors(max_age: usize) -> Cors {
    Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-ratelimit-limit"),
            header::HeaderName::from_static("x-ratelimit-remaining"),
            header::HeaderName::from_static("x-ratelimit-reset"),
        ])
        .max_age(max_age)
}

/// Creates CORS configuration for development environment.
fn create_development_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for development environment");

    base_cors(config.max_age).allow_any_origin()
}

/// Creates CORS configuration for production environment.
fn create_production_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for production environment");

    if config.allowed_origins.is_empty() {
        log::warn!("ALLOWED_ORIGINS is empty; cross-origin requests will be rejected");
    }

    config
        .allowed_origins
        .iter()
        .fold(base_cors(config.max_age), |cors, origin| {
            log::info!("Adding allowed origin: {}", origin);
            cors.allowed_origin(origin)
        })
}
