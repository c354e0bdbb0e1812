//! Domain entities representing core business objects.

pub mod otp_record;

// Re-export commonly used types
pub use otp_record::{
    OtpRecord, DEFAULT_EXPIRY_SECONDS, MAX_ATTEMPTS, OTP_MAX, OTP_MIN, SMS_TIMEOUT_SECONDS,
};
