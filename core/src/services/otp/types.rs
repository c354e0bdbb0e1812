//! Types for OTP service results

/// Result of sending a passcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOtpResult {
    /// The SMS message ID from the provider
    pub message_id: String,
    /// Seconds the code stays valid
    pub expires_in_seconds: u64,
}
