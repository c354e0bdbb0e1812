pub mod otp;

pub use otp::{RequestOtpRequest, TextOrNumber, VerifyOtpRequest};
