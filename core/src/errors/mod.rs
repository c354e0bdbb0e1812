//! Domain-specific error types and error handling.

mod otp_error;


// Re-export all error types
pub use otp_error::{OtpError, OtpErrorKind};

/// Result alias used throughout the domain layer
pub type DomainResult<T> = Result<T, OtpError>;
