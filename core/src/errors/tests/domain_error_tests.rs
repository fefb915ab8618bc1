//! Tests for domain error types

use crate::errors::{DomainError, VerificationError, INVALID_OR_EXPIRED_MESSAGE};

#[test]
fn test_verification_error_converts_into_domain_error() {
    let error: DomainError = VerificationError::InvalidOrExpired.into();
    assert!(matches!(
        error,
        DomainError::Verification(VerificationError::InvalidOrExpired)
    ));
    assert_eq!(error.to_string(), "Verification token is invalid or expired");
}

#[test]
fn test_user_message_does_not_hint_at_cause() {
    let message = VerificationError::InvalidOrExpired.user_message();
    assert_eq!(message, INVALID_OR_EXPIRED_MESSAGE);
    assert!(!message.contains("used"));
    assert!(!message.contains("not found"));
}

#[test]
fn test_only_storage_errors_are_retryable() {
    let storage = DomainError::StorageUnavailable {
        message: "connection refused".to_string(),
    };
    let validation = DomainError::Validation {
        message: "bad email".to_string(),
    };
    let verification: DomainError = VerificationError::InvalidOrExpired.into();

    assert!(storage.is_retryable());
    assert!(!validation.is_retryable());
    assert!(!verification.is_retryable());
}
