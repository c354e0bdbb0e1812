//! Shared utilities and common types for the PhoneVerify server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - The JSON response envelope returned by every endpoint
//! - Phone number helpers (normalisation, masking for logs)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, CorsConfig, Environment, OtpConfig, RateLimitConfig, ServerConfig,
    SmsConfig, SmsProvider,
};
pub use types::{HealthResponse, OtpResponse};
pub use utils::phone;
