//! OTP service module for SMS-based phone verification
//!
//! This module provides the passcode workflow:
//! - Code generation and delivery through the SMS collaborator
//! - Verification with expiry and attempt tracking
//! - Lockout after repeated failures

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::{OtpServiceConfig, DEFAULT_MESSAGE_TEMPLATE};
pub use service::OtpService;
pub use traits::{OtpStoreTrait, SmsServiceTrait};
pub use types::SendOtpResult;
