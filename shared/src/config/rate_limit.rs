//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or, ConfigError};

/// Per-client fixed-window rate limit applied to the `/api` scope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Requests allowed per client within one window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Proxy addresses whose `X-Forwarded-For` / `X-Real-IP` headers are honored
    #[serde(default)]
    pub trusted_proxies: Vec<String>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
            trusted_proxies: vec![],
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let trusted_proxies = env_opt("TRUSTED_PROXIES")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            enabled: env_or("RATE_LIMIT_ENABLED", default_enabled())?,
            max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", default_max_requests())?,
            window_seconds: env_or("RATE_LIMIT_WINDOW_SECONDS", default_window_seconds())?,
            trusted_proxies,
        })
    }

    /// Disabled limiter, convenient for tests
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_requests() -> u32 {
    100
}

fn default_window_seconds() -> u64 {
    15 * 60 // 15 minutes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_default() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_requests, 100);
        assert_eq!(config.window_seconds, 900);
        assert!(config.trusted_proxies.is_empty());
        assert!(!RateLimitConfig::disabled().enabled);
    }

    #[test]
    fn test_trusted_proxies_from_env() {
        std::env::set_var("TRUSTED_PROXIES", "10.0.0.1, ::1,,");
        let config = RateLimitConfig::from_env().unwrap();
        std::env::remove_var("TRUSTED_PROXIES");

        assert_eq!(config.trusted_proxies, vec!["10.0.0.1", "::1"]);
    }
}
