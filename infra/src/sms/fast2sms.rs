//! Fast2SMS Service Implementation
//!
//! Sends DLT-registered template messages through the Fast2SMS `bulkV2`
//! endpoint. The rendered passcode text travels in `variables_values`; the
//! provider substitutes it into the registered template identified by
//! `message`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, CONNECTION};
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use pv_shared::config::SmsConfig;
use pv_shared::utils::phone::mask_phone_number;

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

/// Fast2SMS route for DLT template messages
const DLT_ROUTE: &str = "dlt";

/// Fast2SMS service configuration
#[derive(Debug, Clone)]
pub struct Fast2SmsConfig {
    /// API key, sent as the `authorization` query parameter
    pub api_key: String,
    /// Registered sender id
    pub sender_id: String,
    /// DLT template id
    pub message_id: String,
    /// API root
    pub base_url: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Fast2SmsConfig {
    /// Extract the Fast2SMS settings from the SMS configuration
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        config
            .require_credentials()
            .map_err(|e| InfrastructureError::Config(e.to_string()))?;

        let required = |value: &Option<String>| value.clone().unwrap_or_default();
        Ok(Self {
            api_key: required(&config.api_key),
            sender_id: required(&config.sender_id),
            message_id: required(&config.message_id),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: config.timeout_seconds,
        })
    }
}

/// Body returned by the `bulkV2` endpoint
#[derive(Debug, Deserialize)]
pub struct Fast2SmsResponse {
    /// Whether the provider accepted the request
    #[serde(rename = "return", default)]
    pub accepted: bool,
    /// Provider request id, present on success
    #[serde(default)]
    pub request_id: Option<String>,
    /// Human-readable detail; a string or a list of strings
    #[serde(default)]
    pub message: serde_json::Value,
}

impl Fast2SmsResponse {
    /// Convert the provider verdict into a message id
    pub fn into_message_id(self) -> Result<String, InfrastructureError> {
        if !self.accepted {
            return Err(InfrastructureError::Sms(format!(
                "Fast2SMS rejected the request: {}",
                self.detail()
            )));
        }
        Ok(self
            .request_id
            .unwrap_or_else(|| format!("fast2sms_{}", Uuid::new_v4())))
    }

    fn detail(&self) -> String {
        match &self.message {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            serde_json::Value::Null => "no detail".to_string(),
            other => other.to_string(),
        }
    }
}

/// Fast2SMS service implementation
pub struct Fast2SmsService {
    client: reqwest::Client,
    config: Fast2SmsConfig,
}

impl Fast2SmsService {
    /// Create a new Fast2SMS service
    pub fn new(config: Fast2SmsConfig) -> Result<Self, InfrastructureError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            sender_id = %config.sender_id,
            base_url = %config.base_url,
            "Fast2SMS service initialized"
        );

        Ok(Self { client, config })
    }

    /// Build the `bulkV2` request without sending it
    pub fn build_request(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<reqwest::Request, InfrastructureError> {
        let url = format!("{}/bulkV2", self.config.base_url);
        let request = self
            .client
            .get(url)
            .query(&[
                ("authorization", self.config.api_key.as_str()),
                ("sender_id", self.config.sender_id.as_str()),
                ("message", self.config.message_id.as_str()),
                ("variables_values", message),
                ("route", DLT_ROUTE),
                ("numbers", phone_number),
            ])
            .build()
            .map_err(|e| InfrastructureError::Http(e.without_url()))?;
        Ok(request)
    }
}

#[async_trait]
impl SmsService for Fast2SmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(phone_number);
        let request = self.build_request(phone_number, message)?;

        // The request URL carries the API key and the recipient
        let response = self.client.execute(request).await.map_err(|e| {
            let e = e.without_url();
            error!(provider = "fast2sms", phone = %masked_phone, error = %e, "SMS request failed");
            InfrastructureError::Http(e)
        })?;

        let status = response.status();
        let body: Fast2SmsResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!(
                provider = "fast2sms",
                phone = %masked_phone,
                status = %status,
                error = %e,
                "Unreadable SMS provider response"
            );
            InfrastructureError::Http(e)
        })?;

        let message_id = body.into_message_id().map_err(|e| {
            error!(provider = "fast2sms", phone = %masked_phone, status = %status, error = %e, "SMS rejected");
            e
        })?;

        info!(
            target: "sms_service",
            provider = "fast2sms",
            phone = %masked_phone,
            message_id = %message_id,
            "SMS accepted by provider"
        );
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Fast2SMS"
    }
}
