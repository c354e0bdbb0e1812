//! Unit tests for the OTP service

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::otp_record::{OTP_MAX, OTP_MIN};
use crate::errors::{OtpError, OtpErrorKind};
use crate::services::otp::{OtpService, OtpServiceConfig, OtpStoreTrait};

use super::mocks::{MockOtpStore, MockSmsService};

const PHONE: &str = "+919876543210";

fn service_with(
    sms_service: MockSmsService,
) -> (
    OtpService<MockSmsService, MockOtpStore>,
    Arc<MockSmsService>,
    Arc<MockOtpStore>,
) {
    let sms_service = Arc::new(sms_service);
    let store = Arc::new(MockOtpStore::new());
    let service = OtpService::new(
        sms_service.clone(),
        store.clone(),
        OtpServiceConfig::default(),
    );
    (service, sms_service, store)
}

fn wrong_code_for(code: &str) -> &'static str {
    if code == "1234" {
        "4321"
    } else {
        "1234"
    }
}

#[tokio::test]
async fn test_request_otp_success() {
    let (service, sms_service, store) = service_with(MockSmsService::new(false));

    let result = service.request_otp(PHONE).await.unwrap();
    assert!(result.message_id.starts_with("mock-msg-"));
    assert_eq!(result.expires_in_seconds, 300);

    let record = store.get(PHONE).expect("record stored");
    assert_eq!(record.attempts, 0);
    assert!((OTP_MIN..=OTP_MAX).contains(&record.code));

    // Stored code is the one that was sent
    assert_eq!(
        sms_service.get_sent_message(PHONE),
        Some(format!("{} is your OTP for verification.", record.code))
    );
}

#[tokio::test]
async fn test_request_otp_empty_phone() {
    let (service, sms_service, store) = service_with(MockSmsService::new(false));

    for phone in ["", "   "] {
        let error = service.request_otp(phone).await.unwrap_err();
        assert_eq!(error, OtpError::invalid_input("Phone number is required"));
    }
    assert_eq!(sms_service.sends(), 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_request_otp_provider_failure_stores_nothing() {
    let (service, sms_service, store) = service_with(MockSmsService::new(true));

    let error = service.request_otp(PHONE).await.unwrap_err();
    assert_eq!(error.kind(), OtpErrorKind::ProviderFailure);
    assert_eq!(error.client_message(), "Failed to send OTP");
    assert_eq!(sms_service.sends(), 1);
    assert!(store.get(PHONE).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_request_otp_provider_timeout() {
    let (service, _sms_service, store) =
        service_with(MockSmsService::with_delay(Duration::from_secs(30)));

    let error = service.request_otp(PHONE).await.unwrap_err();
    match error {
        OtpError::ProviderFailure { reason } => assert!(reason.contains("timed out")),
        other => panic!("Expected ProviderFailure, got {:?}", other),
    }
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_slow_provider_within_timeout_succeeds() {
    let (service, _sms_service, store) =
        service_with(MockSmsService::with_delay(Duration::from_secs(4)));

    assert!(service.request_otp(PHONE).await.is_ok());
    assert!(store.get(PHONE).is_some());
}

#[tokio::test]
async fn test_request_failure_keeps_previous_code() {
    let sms_ok = Arc::new(MockSmsService::new(false));
    let sms_fail = Arc::new(MockSmsService::new(true));
    let store = Arc::new(MockOtpStore::new());

    let good = OtpService::new(sms_ok.clone(), store.clone(), OtpServiceConfig::default());
    let bad = OtpService::new(sms_fail, store.clone(), OtpServiceConfig::default());

    good.request_otp(PHONE).await.unwrap();
    let code = sms_ok.get_sent_code(PHONE).unwrap();

    assert!(bad.request_otp(PHONE).await.is_err());
    assert_eq!(good.verify_otp(PHONE, &code).await, Ok(()));
}

#[tokio::test]
async fn test_verify_otp_success_once() {
    let (service, sms_service, store) = service_with(MockSmsService::new(false));

    service.request_otp(PHONE).await.unwrap();
    let code = sms_service.get_sent_code(PHONE).unwrap();

    assert_eq!(service.verify_otp(PHONE, &code).await, Ok(()));
    assert!(store.get(PHONE).is_none());

    // Code cannot be replayed
    assert_eq!(
        service.verify_otp(PHONE, &code).await,
        Err(OtpError::NotFound)
    );
}

#[tokio::test]
async fn test_verify_otp_trims_input() {
    let (service, sms_service, _store) = service_with(MockSmsService::new(false));

    service.request_otp(PHONE).await.unwrap();
    let code = sms_service.get_sent_code(PHONE).unwrap();

    let padded_phone = format!("  {}  ", PHONE);
    let padded_code = format!(" {} ", code);
    assert_eq!(service.verify_otp(&padded_phone, &padded_code).await, Ok(()));
}

#[tokio::test]
async fn test_verify_otp_missing_input() {
    let (service, _sms_service, store) = service_with(MockSmsService::new(false));
    service.request_otp(PHONE).await.unwrap();

    for (phone, otp) in [("", "1234"), (PHONE, ""), ("  ", "  ")] {
        let error = service.verify_otp(phone, otp).await.unwrap_err();
        assert_eq!(
            error,
            OtpError::invalid_input("Phone number and OTP are required")
        );
    }
    // Store untouched
    assert_eq!(store.attempts(PHONE), Some(0));
}

#[tokio::test]
async fn test_verify_otp_not_requested() {
    let (service, _sms_service, _store) = service_with(MockSmsService::new(false));

    assert_eq!(
        service.verify_otp(PHONE, "1234").await,
        Err(OtpError::NotFound)
    );
}

#[tokio::test]
async fn test_verify_otp_lockout_sequence() {
    let (service, sms_service, store) = service_with(MockSmsService::new(false));

    service.request_otp(PHONE).await.unwrap();
    let code = sms_service.get_sent_code(PHONE).unwrap();
    let wrong = wrong_code_for(&code);

    assert_eq!(
        service.verify_otp(PHONE, wrong).await,
        Err(OtpError::Mismatch {
            remaining_attempts: 2
        })
    );
    assert_eq!(
        service.verify_otp(PHONE, wrong).await,
        Err(OtpError::Mismatch {
            remaining_attempts: 1
        })
    );
    assert_eq!(
        service.verify_otp(PHONE, wrong).await,
        Err(OtpError::LockedOut)
    );
    assert!(store.get(PHONE).is_none());

    // Even the correct code is rejected after lockout
    assert_eq!(
        service.verify_otp(PHONE, &code).await,
        Err(OtpError::NotFound)
    );
}

#[tokio::test]
async fn test_verify_after_mismatch_still_accepts_correct_code() {
    let (service, sms_service, _store) = service_with(MockSmsService::new(false));

    service.request_otp(PHONE).await.unwrap();
    let code = sms_service.get_sent_code(PHONE).unwrap();

    assert!(service.verify_otp(PHONE, wrong_code_for(&code)).await.is_err());
    assert_eq!(service.remaining_attempts(PHONE), Some(2));
    assert_eq!(service.verify_otp(PHONE, &code).await, Ok(()));
}

#[tokio::test]
async fn test_non_numeric_input_counts_as_mismatch() {
    let (service, sms_service, store) = service_with(MockSmsService::new(false));

    service.request_otp(PHONE).await.unwrap();
    let code = sms_service.get_sent_code(PHONE).unwrap();

    // A numeric prefix followed by junk is not accepted
    let with_suffix = format!("{}abc", code);
    assert_eq!(
        service.verify_otp(PHONE, &with_suffix).await,
        Err(OtpError::Mismatch {
            remaining_attempts: 2
        })
    );
    assert_eq!(store.attempts(PHONE), Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_verify_otp_expired() {
    let (service, sms_service, store) = service_with(MockSmsService::new(false));

    service.request_otp(PHONE).await.unwrap();
    let code = sms_service.get_sent_code(PHONE).unwrap();

    tokio::time::advance(Duration::from_secs(301)).await;

    assert!(!service.has_active_otp(PHONE));
    assert_eq!(
        service.verify_otp(PHONE, &code).await,
        Err(OtpError::Expired)
    );
    assert!(store.get(PHONE).is_none());
    assert_eq!(
        service.verify_otp(PHONE, &code).await,
        Err(OtpError::NotFound)
    );
}

#[tokio::test(start_paused = true)]
async fn test_verify_otp_at_expiry_boundary() {
    let (service, sms_service, _store) = service_with(MockSmsService::new(false));

    service.request_otp(PHONE).await.unwrap();
    let code = sms_service.get_sent_code(PHONE).unwrap();

    tokio::time::advance(Duration::from_secs(299)).await;
    assert_eq!(service.verify_otp(PHONE, &code).await, Ok(()));
}

#[tokio::test(start_paused = true)]
async fn test_mismatch_does_not_extend_expiry() {
    let (service, sms_service, _store) = service_with(MockSmsService::new(false));

    service.request_otp(PHONE).await.unwrap();
    let code = sms_service.get_sent_code(PHONE).unwrap();

    tokio::time::advance(Duration::from_secs(200)).await;
    assert!(service.verify_otp(PHONE, wrong_code_for(&code)).await.is_err());

    tokio::time::advance(Duration::from_secs(101)).await;
    assert_eq!(
        service.verify_otp(PHONE, &code).await,
        Err(OtpError::Expired)
    );
}

#[tokio::test]
async fn test_new_request_invalidates_previous_code() {
    let (service, sms_service, store) = service_with(MockSmsService::new(false));

    service.request_otp(PHONE).await.unwrap();
    let first = store.get(PHONE).unwrap();
    service.verify_otp(PHONE, wrong_code_for(&first.code.to_string())).await.ok();

    service.request_otp(PHONE).await.unwrap();
    let second = store.get(PHONE).unwrap();
    let second_code = sms_service.get_sent_code(PHONE).unwrap();

    assert_ne!(first.session_id, second.session_id);
    assert_eq!(second.attempts, 0);
    assert_eq!(second_code, second.code.to_string());

    if first.code != second.code {
        assert!(service
            .verify_otp(PHONE, &first.code.to_string())
            .await
            .is_err());
    }
    assert_eq!(service.verify_otp(PHONE, &second_code).await, Ok(()));
}

#[tokio::test]
async fn test_phones_are_independent() {
    let (service, sms_service, _store) = service_with(MockSmsService::new(false));
    let other = "+14155550123";

    service.request_otp(PHONE).await.unwrap();
    service.request_otp(other).await.unwrap();
    let code = sms_service.get_sent_code(PHONE).unwrap();

    for _ in 0..3 {
        let _ = service.verify_otp(other, "0").await;
    }
    assert!(!service.has_active_otp(other));
    assert_eq!(service.verify_otp(PHONE, &code).await, Ok(()));
}

#[tokio::test]
async fn test_custom_max_attempts() {
    let sms_service = Arc::new(MockSmsService::new(false));
    let store = Arc::new(MockOtpStore::new());
    let config = OtpServiceConfig {
        max_attempts: 1,
        ..Default::default()
    };
    let service = OtpService::new(sms_service.clone(), store, config);

    service.request_otp(PHONE).await.unwrap();
    assert_eq!(
        service.verify_otp(PHONE, "0").await,
        Err(OtpError::LockedOut)
    );
}

#[test]
fn test_generate_code_range() {
    for _ in 0..1000 {
        let code = OtpService::<MockSmsService, MockOtpStore>::generate_code();
        assert!((OTP_MIN..=OTP_MAX).contains(&code));
    }
}
