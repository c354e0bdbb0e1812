//! Shared fixtures for API integration tests

use actix_web::web;
use std::sync::Arc;

use pv_api::middleware::RateLimiter;
use pv_api::routes::otp::AppState;
use pv_core::services::{OtpService, OtpServiceConfig};
use pv_infra::{MemoryOtpStore, MockSmsService, SmsServiceAdapter};
use pv_shared::config::{AppConfig, RateLimitConfig};

pub type TestState = web::Data<AppState<SmsServiceAdapter, MemoryOtpStore>>;

#[allow(dead_code)]
pub struct TestContext {
    pub state: TestState,
    pub sms: MockSmsService,
    pub store: Arc<MemoryOtpStore>,
    pub config: AppConfig,
    pub rate_limiter: RateLimiter,
}

/// Application wiring with the mock SMS provider and rate limiting off
pub fn context() -> TestContext {
    context_with_rate_limit(RateLimitConfig::disabled())
}

pub fn context_with_rate_limit(rate_limit: RateLimitConfig) -> TestContext {
    let sms = MockSmsService::new();
    let store = Arc::new(MemoryOtpStore::new());
    let otp_service = OtpService::new(
        Arc::new(SmsServiceAdapter::new(Arc::new(sms.clone()))),
        store.clone(),
        OtpServiceConfig::default(),
    );
    let config = AppConfig {
        rate_limit: rate_limit.clone(),
        ..Default::default()
    };

    TestContext {
        state: web::Data::new(AppState::new(Arc::new(otp_service))),
        sms,
        store,
        config,
        rate_limiter: RateLimiter::new(rate_limit),
    }
}
