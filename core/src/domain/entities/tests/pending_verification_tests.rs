//! Unit tests for pending verification entity

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::{ConfirmedEmail, PendingVerification};

fn issued_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
}

#[test]
fn test_new_pending_verification() {
    let now = issued_at();
    let record = PendingVerification::new("user@example.com", "ab".repeat(32), now, Duration::minutes(30));

    assert_eq!(record.email, "user@example.com");
    assert_eq!(record.token_fingerprint.len(), 64);
    assert_eq!(record.created_at, now);
    assert_eq!(record.expires_at, now + Duration::minutes(30));
}

#[test]
fn test_is_live_at_boundaries() {
    let now = issued_at();
    let record = PendingVerification::new("user@example.com", "fp", now, Duration::minutes(30));

    assert!(record.is_live_at(now));
    assert!(record.is_live_at(now + Duration::minutes(29) + Duration::seconds(59)));
    // Expiry is exclusive
    assert!(!record.is_live_at(now + Duration::minutes(30)));
    assert!(!record.is_live_at(now + Duration::minutes(30) + Duration::seconds(1)));
}

#[test]
fn test_time_until_expiration() {
    let now = issued_at();
    let record = PendingVerification::new("user@example.com", "fp", now, Duration::minutes(30));

    assert_eq!(record.time_until_expiration(now), Duration::minutes(30));
    assert_eq!(
        record.time_until_expiration(now + Duration::minutes(45)),
        Duration::zero()
    );
}

#[test]
fn test_ids_are_unique() {
    let now = issued_at();
    let a = PendingVerification::new("user@example.com", "fp-a", now, Duration::minutes(30));
    let b = PendingVerification::new("user@example.com", "fp-b", now, Duration::minutes(30));
    assert_ne!(a.id, b.id);
}

#[test]
fn test_serialization() {
    let record = PendingVerification::new("user@example.com", "fp", issued_at(), Duration::minutes(30));

    let json = serde_json::to_string(&record).unwrap();
    let deserialized: PendingVerification = serde_json::from_str(&json).unwrap();

    assert_eq!(record, deserialized);
}

#[test]
fn test_confirmed_email_new() {
    let confirmed = ConfirmedEmail::new("user@example.com", issued_at());
    assert_eq!(confirmed.email, "user@example.com");
    assert_eq!(confirmed.confirmed_at, issued_at());
}

#[test]
fn test_expiry_saturates_instead_of_overflowing() {
    let record = PendingVerification::new(
        "user@example.com",
        "fp",
        issued_at(),
        Duration::MAX,
    );

    assert_eq!(record.expires_at, chrono::DateTime::<Utc>::MAX_UTC);
    assert!(record.is_live_at(issued_at()));
}
