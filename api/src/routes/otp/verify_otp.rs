use actix_web::{web, HttpResponse};

use pv_core::errors::OtpError;
use pv_core::services::{OtpStoreTrait, SmsServiceTrait};
use pv_shared::types::OtpResponse;
use pv_shared::utils::phone::mask_phone_number;

use super::AppState;
use crate::dto::VerifyOtpRequest;
use crate::handlers::handle_otp_error;

/// Handler for POST /api/verify-otp
///
/// Accepts the passcode as a string or a number.
///
/// # Request Body
///
/// ```json
/// { "phone": "9876543210", "otp": "4821" }
/// ```
///
/// # Responses
///
/// - 200 `{ "success": true, "message": "OTP verified successfully" }`
/// - 400 with the reason in `message`
pub async fn verify_otp<S, C>(
    state: web::Data<AppState<S, C>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    C: OtpStoreTrait + 'static,
{
    let Some((phone, otp)) = request.credentials() else {
        return handle_otp_error(&OtpError::invalid_input(
            "Phone number and OTP are required",
        ));
    };

    match state.otp_service.verify_otp(&phone, &otp).await {
        Ok(()) => {
            log::info!("OTP verified for {}", mask_phone_number(&phone));
            HttpResponse::Ok().json(OtpResponse::success("OTP verified successfully"))
        }
        Err(error) => handle_otp_error(&error),
    }
}
