//! Mock implementations for testing the OTP service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;
use crate::services::otp::traits::{OtpStoreTrait, SmsServiceTrait};

// Mock SMS service for testing
pub struct MockSmsService {
    pub sent_messages: Arc<Mutex<HashMap<String, String>>>,
    pub send_count: AtomicUsize,
    pub should_fail: bool,
    pub delay: Option<Duration>,
}

impl MockSmsService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            send_count: AtomicUsize::new(0),
            should_fail,
            delay: None,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(false)
        }
    }

    pub fn get_sent_message(&self, phone: &str) -> Option<String> {
        self.sent_messages.lock().unwrap().get(phone).cloned()
    }

    /// The passcode is the first word of the rendered message
    pub fn get_sent_code(&self, phone: &str) -> Option<String> {
        self.get_sent_message(phone)
            .and_then(|message| message.split_whitespace().next().map(str::to_string))
    }

    pub fn sends(&self) -> usize {
        self.send_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SmsServiceTrait for MockSmsService {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail {
            return Err("SMS service error".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(phone.to_string(), message.to_string());
        Ok(format!("mock-msg-{}", Uuid::new_v4()))
    }
}

// Mock store for testing
pub struct MockOtpStore {
    pub records: Mutex<HashMap<String, OtpRecord>>,
}

impl MockOtpStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn attempts(&self, phone: &str) -> Option<u32> {
        self.records.lock().unwrap().get(phone).map(|r| r.attempts)
    }
}

impl OtpStoreTrait for MockOtpStore {
    fn set(&self, phone: &str, code: u16) -> OtpRecord {
        let record = OtpRecord::new(phone, code);
        self.records
            .lock()
            .unwrap()
            .insert(phone.to_string(), record.clone());
        record
    }

    fn get(&self, phone: &str) -> Option<OtpRecord> {
        self.records.lock().unwrap().get(phone).cloned()
    }

    fn remove(&self, phone: &str) {
        self.records.lock().unwrap().remove(phone);
    }

    fn increment_attempts(&self, phone: &str, session_id: Uuid, max_attempts: u32) -> Option<u32> {
        let mut records = self.records.lock().unwrap();
        let record = records.get_mut(phone).filter(|r| r.session_id == session_id)?;
        record.attempts += 1;
        let attempts = record.attempts;
        if attempts >= max_attempts {
            records.remove(phone);
        }
        Some(attempts)
    }

    fn take_if_current(&self, phone: &str, session_id: Uuid) -> bool {
        let mut records = self.records.lock().unwrap();
        match records.get(phone) {
            Some(record) if record.session_id == session_id => {
                records.remove(phone);
                true
            }
            _ => false,
        }
    }

    fn purge_expired(&self, window: Duration) -> usize {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|_, record| !record.is_expired(window));
        before - records.len()
    }

    fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}
