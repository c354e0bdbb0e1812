//! OTP route handlers
//!
//! This module contains the passcode endpoints:
//! - Requesting a code by SMS
//! - Verifying a submitted code

pub mod request_otp;
pub mod verify_otp;

pub use request_otp::AppState;
