//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the PhoneVerify service.
//! It provides concrete implementations of the collaborator traits declared in
//! `pv_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Sharded in-memory passcode store with a background sweeper
//! - **SMS**: SMS provider integrations (Fast2SMS) and a mock for development

/// SMS service module - External SMS providers
pub mod sms;

/// Cache module - In-memory passcode storage
pub mod cache;

pub use cache::MemoryOtpStore;
pub use sms::{create_sms_service, Fast2SmsService, MockSmsService, SmsServiceAdapter};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
