//! SMS Service Trait Adapter
//!
//! Bridges any infrastructure [`SmsService`] to the core `SmsServiceTrait`
//! consumed by the OTP service.

use async_trait::async_trait;
use std::sync::Arc;

use pv_core::services::SmsServiceTrait;

use crate::sms::sms_service::SmsService;

/// Adapter that implements the core SmsServiceTrait for any provider
#[derive(Clone)]
pub struct SmsServiceAdapter {
    inner: Arc<dyn SmsService>,
}

impl SmsServiceAdapter {
    pub fn new(inner: Arc<dyn SmsService>) -> Self {
        Self { inner }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl SmsServiceTrait for SmsServiceAdapter {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        self.inner
            .send_sms(phone, message)
            .await
            .map_err(|e| e.to_string())
    }
}
