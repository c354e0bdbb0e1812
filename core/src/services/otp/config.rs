//! Configuration for the OTP service

use std::time::Duration;

use pv_shared::config::{OtpConfig, SmsConfig};

use crate::domain::entities::otp_record::{
    DEFAULT_EXPIRY_SECONDS, MAX_ATTEMPTS, SMS_TIMEOUT_SECONDS,
};

/// SMS body sent to the user; `{code}` is replaced by the passcode
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "{code} is your OTP for verification.";

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Seconds before an issued code expires
    pub expiry_seconds: u64,
    /// Failed verifications allowed before the code is discarded
    pub max_attempts: u32,
    /// Upper bound for one SMS send
    pub sms_timeout_seconds: u64,
    /// Message body template
    pub message_template: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            expiry_seconds: DEFAULT_EXPIRY_SECONDS,
            max_attempts: MAX_ATTEMPTS,
            sms_timeout_seconds: SMS_TIMEOUT_SECONDS,
            message_template: DEFAULT_MESSAGE_TEMPLATE.to_string(),
        }
    }
}

impl OtpServiceConfig {
    /// Build the service configuration from the application settings
    pub fn from_app_config(otp: &OtpConfig, sms: &SmsConfig) -> Self {
        Self {
            expiry_seconds: otp.expiry_seconds,
            max_attempts: otp.max_attempts,
            sms_timeout_seconds: sms.timeout_seconds,
            ..Default::default()
        }
    }

    pub fn expiry(&self) -> Duration {
        Duration::from_secs(self.expiry_seconds)
    }

    pub fn sms_timeout(&self) -> Duration {
        Duration::from_secs(self.sms_timeout_seconds)
    }

    /// Render the SMS body for `code`
    pub fn render_message(&self, code: u16) -> String {
        self.message_template.replace("{code}", &code.to_string())
    }
}
