//! Traits for SMS and store integration

use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;

/// Trait for SMS service integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Deliver `message` to `phone`, returning the provider's message id
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String>;
}

/// Trait for passcode storage
///
/// Every method is a single critical section and must not suspend while
/// holding a lock.
pub trait OtpStoreTrait: Send + Sync {
    /// Insert or overwrite the record for `phone` with a fresh issuance
    fn set(&self, phone: &str, code: u16) -> OtpRecord;

    /// Snapshot of the current record, expired or not
    fn get(&self, phone: &str) -> Option<OtpRecord>;

    /// Delete the record if present
    fn remove(&self, phone: &str);

    /// Count one failed attempt against issuance `session_id`
    ///
    /// Returns the new count, or `None` when the record is gone or has been
    /// replaced. The record is removed once the count reaches `max_attempts`.
    fn increment_attempts(&self, phone: &str, session_id: Uuid, max_attempts: u32)
        -> Option<u32>;

    /// Remove the record only if it is still issuance `session_id`
    fn take_if_current(&self, phone: &str, session_id: Uuid) -> bool;

    fn remove_if_current(&self, phone: &str, session_id: Uuid) {
        let _ = self.take_if_current(phone, session_id);
    }

    /// Drop every record older than `window`, returning how many were removed
    fn purge_expired(&self, window: Duration) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
