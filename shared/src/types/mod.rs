//! Type definitions shared by the HTTP layer
//!
//! - `response` - The `{ success, message }` envelope and the health check body

pub mod response;

pub use response::{HealthResponse, OtpResponse};
