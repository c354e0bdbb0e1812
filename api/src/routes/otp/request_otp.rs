use actix_web::{web, HttpResponse};
use std::sync::Arc;

use pv_core::services::{OtpService, OtpStoreTrait, SmsServiceTrait};
use pv_shared::types::OtpResponse;
use pv_shared::utils::phone::mask_phone_number;

use crate::dto::RequestOtpRequest;
use crate::handlers::handle_otp_error;

/// Application state that holds shared services
pub struct AppState<S, C>
where
    S: SmsServiceTrait,
    C: OtpStoreTrait,
{
    pub otp_service: Arc<OtpService<S, C>>,
}

impl<S, C> AppState<S, C>
where
    S: SmsServiceTrait,
    C: OtpStoreTrait,
{
    pub fn new(otp_service: Arc<OtpService<S, C>>) -> Self {
        Self { otp_service }
    }
}

/// Handler for POST /api/request-otp
///
/// # Request Body
///
/// ```json
/// { "phone": "9876543210" }
/// ```
///
/// # Responses
///
/// - 200 `{ "success": true, "message": "OTP sent successfully" }`
/// - 400 `{ "success": false, "message": "Phone number is required" }`
/// - 500 `{ "success": false, "message": "Failed to send OTP" }`
pub async fn request_otp<S, C>(
    state: web::Data<AppState<S, C>>,
    request: web::Json<RequestOtpRequest>,
) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    C: OtpStoreTrait + 'static,
{
    let phone = request.phone().unwrap_or_default();
    log::info!("Processing request_otp for phone: {}", mask_phone_number(&phone));

    match state.otp_service.request_otp(&phone).await {
        Ok(result) => {
            log::info!(
                "OTP sent to {} (message id {}, valid for {}s)",
                mask_phone_number(&phone),
                result.message_id,
                result.expires_in_seconds
            );
            HttpResponse::Ok().json(OtpResponse::success("OTP sent successfully"))
        }
        Err(error) => handle_otp_error(&error),
    }
}
