//! OTP lifecycle configuration

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError};

/// Passcode lifetime, attempt limit and in-memory store housekeeping
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds an issued code stays acceptable
    #[serde(default = "default_expiry_seconds")]
    pub expiry_seconds: u64,

    /// Failed verifications before the code is discarded
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// How often the background sweeper purges abandoned codes
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,

    /// Number of lock shards in the in-memory store
    #[serde(default = "default_store_shards")]
    pub store_shards: usize,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry_seconds: default_expiry_seconds(),
            max_attempts: default_max_attempts(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
            store_shards: default_store_shards(),
        }
    }
}

impl OtpConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            expiry_seconds: env_or("OTP_EXPIRY_SECONDS", default_expiry_seconds())?,
            max_attempts: env_or("OTP_MAX_ATTEMPTS", default_max_attempts())?,
            sweep_interval_seconds: env_or(
                "OTP_SWEEP_INTERVAL_SECONDS",
                default_sweep_interval_seconds(),
            )?,
            store_shards: env_or("OTP_STORE_SHARDS", default_store_shards())?,
        })
    }
}

fn default_expiry_seconds() -> u64 {
    300 // 5 minutes
}

fn default_max_attempts() -> u32 {
    3
}

fn default_sweep_interval_seconds() -> u64 {
    60
}

fn default_store_shards() -> usize {
    16
}
