//! Main OTP service implementation

use std::sync::Arc;
use tracing;

use pv_shared::utils::phone::mask_phone_number;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::{DomainResult, OtpError};

use super::config::OtpServiceConfig;
use super::traits::{OtpStoreTrait, SmsServiceTrait};
use super::types::SendOtpResult;

/// OTP service for issuing and verifying SMS passcodes
pub struct OtpService<S: SmsServiceTrait, C: OtpStoreTrait> {
    /// SMS service for sending messages
    sms_service: Arc<S>,
    /// Store holding the live code per phone number
    store: Arc<C>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<S: SmsServiceTrait, C: OtpStoreTrait> OtpService<S, C> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `sms_service` - SMS service implementation
    /// * `store` - Passcode store implementation
    /// * `config` - Service configuration
    pub fn new(sms_service: Arc<S>, store: Arc<C>, config: OtpServiceConfig) -> Self {
        Self {
            sms_service,
            store,
            config,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Generate a passcode in the issuable range
    pub fn generate_code() -> u16 {
        OtpRecord::generate_code()
    }

    /// Send a fresh passcode to a phone number
    ///
    /// The SMS is sent first and the code is stored only once the provider
    /// accepts it, replacing any earlier code for the same number. A failed
    /// or timed-out send leaves the store untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(SendOtpResult)` - Provider message id and code lifetime
    /// * `Err(OtpError::InvalidInput)` - If the phone number is empty
    /// * `Err(OtpError::ProviderFailure)` - If the SMS could not be sent
    pub async fn request_otp(&self, phone: &str) -> DomainResult<SendOtpResult> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(OtpError::invalid_input("Phone number is required"));
        }
        let masked = mask_phone_number(phone);

        let code = Self::generate_code();
        let message = self.config.render_message(code);

        let send = self.sms_service.send_sms(phone, &message);
        let message_id = match tokio::time::timeout(self.config.sms_timeout(), send).await {
            Ok(Ok(message_id)) => message_id,
            Ok(Err(reason)) => {
                tracing::error!(
                    phone = %masked,
                    error = %reason,
                    event = "otp_send_failed",
                    "SMS provider rejected passcode"
                );
                return Err(OtpError::provider_failure(reason));
            }
            Err(_) => {
                tracing::error!(
                    phone = %masked,
                    timeout_seconds = self.config.sms_timeout_seconds,
                    event = "otp_send_timeout",
                    "SMS provider timed out"
                );
                return Err(OtpError::provider_failure(format!(
                    "SMS provider timed out after {}s",
                    self.config.sms_timeout_seconds
                )));
            }
        };

        let record = self.store.set(phone, code);

        tracing::info!(
            phone = %masked,
            session_id = %record.session_id,
            message_id = %message_id,
            event = "otp_sent",
            "Sent new passcode"
        );

        Ok(SendOtpResult {
            message_id,
            expires_in_seconds: self.config.expiry_seconds,
        })
    }

    /// Verify a submitted passcode
    ///
    /// A correct code is consumed so it can succeed only once. Each wrong code
    /// counts against the attempt limit; the attempt that reaches the limit
    /// discards the code and reports a lockout.
    pub async fn verify_otp(&self, phone: &str, submitted: &str) -> DomainResult<()> {
        let phone = phone.trim();
        let submitted = submitted.trim();
        if phone.is_empty() || submitted.is_empty() {
            return Err(OtpError::invalid_input("Phone number and OTP are required"));
        }
        let masked = mask_phone_number(phone);

        let record = self.store.get(phone).ok_or(OtpError::NotFound)?;

        if record.is_expired(self.config.expiry()) {
            self.store.remove_if_current(phone, record.session_id);
            tracing::info!(
                phone = %masked,
                session_id = %record.session_id,
                event = "otp_expired",
                "Passcode expired before verification"
            );
            return Err(OtpError::Expired);
        }

        let correct = submitted
            .parse::<u32>()
            .map(|candidate| record.matches(candidate))
            .unwrap_or(false);

        if correct {
            if !self.store.take_if_current(phone, record.session_id) {
                // Consumed or replaced between the read and the take
                return Err(OtpError::NotFound);
            }
            tracing::info!(
                phone = %masked,
                session_id = %record.session_id,
                event = "otp_verified",
                "Passcode verified"
            );
            return Ok(());
        }

        let max_attempts = self.config.max_attempts;
        match self
            .store
            .increment_attempts(phone, record.session_id, max_attempts)
        {
            None => Err(OtpError::NotFound),
            Some(attempts) if attempts >= max_attempts => {
                tracing::warn!(
                    phone = %masked,
                    session_id = %record.session_id,
                    attempts = attempts,
                    event = "otp_locked_out",
                    "Too many failed passcode attempts"
                );
                Err(OtpError::LockedOut)
            }
            Some(attempts) => {
                let remaining_attempts = max_attempts - attempts;
                tracing::info!(
                    phone = %masked,
                    session_id = %record.session_id,
                    remaining_attempts = remaining_attempts,
                    event = "otp_mismatch",
                    "Wrong passcode submitted"
                );
                Err(OtpError::Mismatch { remaining_attempts })
            }
        }
    }

    /// Attempts left for the live code, or `None` if there is none
    pub fn remaining_attempts(&self, phone: &str) -> Option<u32> {
        self.active_record(phone)
            .map(|record| record.remaining_attempts(self.config.max_attempts))
    }

    /// Whether an unexpired code exists for `phone`
    pub fn has_active_otp(&self, phone: &str) -> bool {
        self.active_record(phone).is_some()
    }

    fn active_record(&self, phone: &str) -> Option<OtpRecord> {
        self.store
            .get(phone.trim())
            .filter(|record| !record.is_expired(self.config.expiry()))
    }
}
