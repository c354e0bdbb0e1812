//! SMS Service Interface
//!
//! Defines the trait for SMS provider implementations.

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - Fast2SMS bulk API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str)
        -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}
