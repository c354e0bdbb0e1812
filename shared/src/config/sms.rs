//! SMS provider configuration

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or, ConfigError};

/// Default Fast2SMS API root
pub const FAST2SMS_BASE_URL: &str = "https://www.fast2sms.com/dev";

/// Supported SMS providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Fast2SMS bulk API with DLT routing
    Fast2Sms,
    /// Log-only provider for development and tests
    #[default]
    Mock,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast2sms" => Ok(SmsProvider::Fast2Sms),
            "mock" => Ok(SmsProvider::Mock),
            _ => Err(format!("Unknown SMS provider: {}", s)),
        }
    }
}

impl std::fmt::Display for SmsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmsProvider::Fast2Sms => write!(f, "fast2sms"),
            SmsProvider::Mock => write!(f, "mock"),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Which provider delivers the messages
    pub provider: SmsProvider,

    /// Provider API key (sent as the `authorization` parameter)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Registered sender identity
    pub sender_id: Option<String>,

    /// DLT message template id
    pub message_id: Option<String>,

    /// API root, overridable for tests and sandboxes
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for a single send, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::default(),
            api_key: None,
            sender_id: None,
            message_id: None,
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl SmsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            provider: env_or("SMS_PROVIDER", SmsProvider::default())?,
            api_key: env_opt("FAST2SMS_API_KEY"),
            sender_id: env_opt("FAST2SMS_SENDER_ID"),
            message_id: env_opt("FAST2SMS_MESSAGE_ID"),
            base_url: env_opt("FAST2SMS_BASE_URL").unwrap_or_else(default_base_url),
            timeout_seconds: env_or("SMS_TIMEOUT_SECONDS", default_timeout_seconds())?,
        })
    }

    /// Ensure the credentials needed by the Fast2SMS provider are present
    pub fn require_credentials(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("FAST2SMS_API_KEY", &self.api_key),
            ("FAST2SMS_SENDER_ID", &self.sender_id),
            ("FAST2SMS_MESSAGE_ID", &self.message_id),
        ] {
            if value.is_none() {
                return Err(ConfigError::Missing {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    FAST2SMS_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    5
}
