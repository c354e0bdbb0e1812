use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};

use pv_core::errors::OtpError;
use pv_shared::types::OtpResponse;

/// Message for request bodies that are not valid JSON or exceed the size limit
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// HTTP status for each OTP failure
pub fn status_for(error: &OtpError) -> StatusCode {
    if error.is_server_error() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Handle OTP errors and convert them to the JSON envelope
pub fn handle_otp_error(error: &OtpError) -> HttpResponse {
    match error {
        OtpError::ProviderFailure { reason } => {
            log::error!("OTP Error [{}]: {}", error.code(), reason);
        }
        _ => log::debug!("OTP Error [{}]: {}", error.code(), error),
    }

    HttpResponse::build(status_for(error)).json(OtpResponse::error(error.client_message()))
}

/// Error handler for malformed or oversized JSON bodies
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body for {} {}: {}", req.method(), req.path(), err);

    let response = HttpResponse::BadRequest().json(OtpResponse::error(INVALID_BODY_MESSAGE));
    actix_web::error::InternalError::from_response(err, response).into()
}
