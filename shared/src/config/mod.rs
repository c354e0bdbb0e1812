//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection
//! - `otp` - Passcode lifetime, attempt limit and store housekeeping
//! - `rate_limit` - Per-client request throttling on the API
//! - `server` - HTTP server and CORS configuration
//! - `sms` - SMS provider selection and credentials

pub mod environment;
pub mod otp;
pub mod rate_limit;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

// Re-export commonly used types
pub use environment::Environment;
pub use otp::OtpConfig;
pub use rate_limit::RateLimitConfig;
pub use server::{CorsConfig, ServerConfig};
pub use sms::{SmsConfig, SmsProvider};

/// Errors raised while loading or validating configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required setting: {key}")]
    Missing { key: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// OTP lifecycle configuration
    pub otp: OtpConfig,

    /// SMS provider configuration
    pub sms: SmsConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            otp: OtpConfig::default(),
            sms: SmsConfig::default(),
            rate_limit: RateLimitConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            otp: OtpConfig::from_env()?,
            sms: SmsConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env()?,
            cors: CorsConfig::from_env()?,
        })
    }

    /// Check settings that only make sense together
    ///
    /// Production deployments must not run the real provider without
    /// credentials, nor silently fall back to the mock provider.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("OTP_MAX_ATTEMPTS", u64::from(self.otp.max_attempts)),
            ("OTP_EXPIRY_SECONDS", self.otp.expiry_seconds),
            ("OTP_SWEEP_INTERVAL_SECONDS", self.otp.sweep_interval_seconds),
            ("SMS_TIMEOUT_SECONDS", self.sms.timeout_seconds),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: "0".to_string(),
                });
            }
        }

        if self.environment.is_production() {
            if self.sms.provider == SmsProvider::Mock {
                return Err(ConfigError::InvalidValue {
                    key: "SMS_PROVIDER".to_string(),
                    value: "mock".to_string(),
                });
            }
            self.sms.require_credentials()?;
        }

        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

/// Read `key` from the environment and parse it, falling back to `default`
/// when the variable is unset or empty.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw,
                })
        }
        _ => Ok(default),
    }
}

/// Read an optional string setting, treating empty values as unset
pub(crate) fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
