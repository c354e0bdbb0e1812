//! One-time passcode record for SMS-based phone verification.

use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

/// Smallest code that can be issued
pub const OTP_MIN: u16 = 1000;

/// Largest code that can be issued
pub const OTP_MAX: u16 = 9999;

/// Maximum number of failed verification attempts before lockout
pub const MAX_ATTEMPTS: u32 = 3;

/// Default expiration time for passcodes (5 minutes)
pub const DEFAULT_EXPIRY_SECONDS: u64 = 300;

/// Upper bound for a single SMS provider call
pub const SMS_TIMEOUT_SECONDS: u64 = 5;

/// The live passcode issued to one phone number
///
/// At most one record exists per phone number. Issuing a new code replaces
/// the record wholesale, including its `session_id`, so anything still
/// holding the old `session_id` can no longer touch the new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    /// Phone number the code was sent to
    pub phone: String,

    /// The 4-digit code
    pub code: u16,

    /// Failed verification attempts since issuance
    pub attempts: u32,

    /// When the code was issued
    pub issued_at: Instant,

    /// Identifies this issuance
    pub session_id: Uuid,
}

impl OtpRecord {
    /// Creates a record issued now with no failed attempts
    pub fn new(phone: impl Into<String>, code: u16) -> Self {
        Self {
            phone: phone.into(),
            code,
            attempts: 0,
            issued_at: Instant::now(),
            session_id: Uuid::new_v4(),
        }
    }

    /// Generates a code uniformly distributed over `OTP_MIN..=OTP_MAX`
    pub fn generate_code() -> u16 {
        rand::thread_rng().gen_range(OTP_MIN..=OTP_MAX)
    }

    /// Time elapsed since issuance
    pub fn age(&self) -> Duration {
        self.issued_at.elapsed()
    }

    /// Whether the record is older than `window`
    ///
    /// The boundary itself is still valid: a code is rejected only once its
    /// age strictly exceeds the window.
    pub fn is_expired(&self, window: Duration) -> bool {
        self.age() > window
    }

    /// Whether `candidate` equals the stored code
    pub fn matches(&self, candidate: u32) -> bool {
        candidate == u32::from(self.code)
    }

    /// Attempts left before lockout
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }
}
