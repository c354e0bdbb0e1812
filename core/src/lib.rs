//! # PhoneVerify Core
//!
//! Core business logic and domain layer for the PhoneVerify backend.
//! This crate contains the OTP record entity, the OTP service state machine,
//! the collaborator traits it depends on, and the error taxonomy.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
