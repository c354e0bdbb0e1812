//! Errors raised by the OTP lifecycle
//!
//! The `Display` text of each variant is the message shown to clients, so the
//! presentation layer can forward it without translation.

use thiserror::Error;

/// Failure outcomes of requesting or verifying a passcode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// A required field is missing or empty
    #[error("{message}")]
    InvalidInput { message: String },

    /// No live code exists for the phone number
    #[error("OTP expired or not requested yet.")]
    NotFound,

    /// A code exists but its lifetime has elapsed
    #[error("OTP has expired")]
    Expired,

    /// The submitted code is wrong and attempts remain
    #[error("Invalid OTP")]
    Mismatch { remaining_attempts: u32 },

    /// The attempt that exhausted the limit
    #[error("Too many failed attempts. Please request a new OTP.")]
    LockedOut,

    /// The SMS provider rejected the send, failed, or timed out
    #[error("Failed to send OTP")]
    ProviderFailure { reason: String },
}

/// Discriminant of [`OtpError`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpErrorKind {
    InvalidInput,
    NotFound,
    Expired,
    Mismatch,
    LockedOut,
    ProviderFailure,
}

impl OtpError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        OtpError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn provider_failure(reason: impl Into<String>) -> Self {
        OtpError::ProviderFailure {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> OtpErrorKind {
        match self {
            OtpError::InvalidInput { .. } => OtpErrorKind::InvalidInput,
            OtpError::NotFound => OtpErrorKind::NotFound,
            OtpError::Expired => OtpErrorKind::Expired,
            OtpError::Mismatch { .. } => OtpErrorKind::Mismatch,
            OtpError::LockedOut => OtpErrorKind::LockedOut,
            OtpError::ProviderFailure { .. } => OtpErrorKind::ProviderFailure,
        }
    }

    /// Message safe to show to clients
    pub fn client_message(&self) -> String {
        self.to_string()
    }

    /// Machine-readable code for logs
    pub fn code(&self) -> &'static str {
        match self.kind() {
            OtpErrorKind::InvalidInput => "INVALID_INPUT",
            OtpErrorKind::NotFound => "OTP_NOT_FOUND",
            OtpErrorKind::Expired => "OTP_EXPIRED",
            OtpErrorKind::Mismatch => "OTP_MISMATCH",
            OtpErrorKind::LockedOut => "OTP_LOCKED_OUT",
            OtpErrorKind::ProviderFailure => "SMS_PROVIDER_FAILURE",
        }
    }

    /// Whether the failure originates outside the client's control
    pub fn is_server_error(&self) -> bool {
        matches!(self, OtpError::ProviderFailure { .. })
    }
}
