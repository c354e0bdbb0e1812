//! Mock SMS Service Implementation
//!
//! A mock implementation of the SMS service for development and testing.
//! This implementation logs SMS messages instead of sending them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};
use uuid::Uuid;

use pv_shared::utils::phone::mask_phone_number;

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Mock SMS service for development and testing
///
/// This implementation:
/// - Logs SMS messages
/// - Generates mock message IDs
/// - Tracks message count and the last message per phone for testing
#[derive(Clone, Default)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Last message delivered to each phone number
    outbox: Arc<Mutex<HashMap<String, String>>>,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service that fails every send
    pub fn failing() -> Self {
        let service = Self::new();
        service.set_simulate_failure(true);
        service
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Last message delivered to `phone`
    pub fn last_message(&self, phone: &str) -> Option<String> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(phone)
            .cloned()
    }

    /// Passcode contained in the last message delivered to `phone`
    pub fn last_code(&self, phone: &str) -> Option<String> {
        self.last_message(phone).and_then(|message| {
            message
                .split(|c: char| !c.is_ascii_digit())
                .find(|token| token.len() == 4)
                .map(str::to_string)
        })
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(phone_number);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                provider = "mock",
                phone = %masked_phone,
                "Mock SMS service simulating failure"
            );
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(phone_number.to_string(), message.to_string());

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            count = count,
            "Mock SMS delivered: {}",
            message
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
