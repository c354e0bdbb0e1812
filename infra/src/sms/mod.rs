//! SMS Service Module
//!
//! This module provides SMS service implementations for delivering passcodes.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Log output for development
//! - **Fast2SMS Support**: Production SMS via the Fast2SMS DLT route
//! - **Security**: Phone number masking in logs

use std::sync::Arc;

use pv_shared::config::{Environment, SmsConfig, SmsProvider};

pub mod adapter;
pub mod fast2sms;
pub mod mock_sms;
pub mod sms_service;

// Re-export commonly used types
pub use adapter::SmsServiceAdapter;
pub use fast2sms::{Fast2SmsConfig, Fast2SmsResponse, Fast2SmsService};
pub use mock_sms::MockSmsService;
pub use sms_service::SmsService;

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// Outside production a Fast2SMS configuration with missing credentials
/// falls back to the mock provider with a warning. In production the same
/// situation is an error.
pub fn create_sms_service(
    config: &SmsConfig,
    environment: Environment,
) -> Result<SmsServiceAdapter, InfrastructureError> {
    let service: Arc<dyn SmsService> = match config.provider {
        SmsProvider::Mock => Arc::new(MockSmsService::new()),
        SmsProvider::Fast2Sms => match Fast2SmsConfig::from_sms_config(config) {
            Ok(fast2sms_config) => Arc::new(Fast2SmsService::new(fast2sms_config)?),
            Err(e) if !environment.is_production() => {
                tracing::warn!("Fast2SMS unavailable ({}), falling back to mock SMS service", e);
                Arc::new(MockSmsService::new())
            }
            Err(e) => return Err(e),
        },
    };

    tracing::info!(provider = service.provider_name(), "SMS service ready");
    Ok(SmsServiceAdapter::new(service))
}
