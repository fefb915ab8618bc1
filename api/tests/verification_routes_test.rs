//! End-to-end tests for the verification routes
//!
//! The full application is assembled with the in-memory stores, a manual
//! clock and a mailer that records what it was asked to send.

use actix_web::{http::StatusCode, test, web};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use ea_api::{create_app, AppState};
use ea_core::domain::entities::PendingVerification;
use ea_core::errors::DomainError;
use ea_core::repositories::{
    ConfirmedEmailRepository, InMemoryConfirmedEmailRepository,
    InMemoryPendingVerificationRepository, PendingVerificationRepository,
};
use ea_core::services::{
    ManualClock, MailerTrait, OutboundEmail, VerificationService, VerificationServiceConfig,
};
use ea_shared::{Environment, ServerConfig, VerificationConfig};

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailerTrait for RecordingMailer {
    async fn send(&self, message: &OutboundEmail) -> Result<String, String> {
        self.sent.lock().unwrap().push(message.clone());
        Ok("recorded".to_string())
    }
}

/// Pending store whose backend is always down
struct DownPendingRepository;

#[async_trait]
impl PendingVerificationRepository for DownPendingRepository {
    async fn create(
        &self,
        _email: &str,
        _token_fingerprint: &str,
        _ttl: Duration,
        _now: DateTime<Utc>,
    ) -> Result<PendingVerification, DomainError> {
        Err(outage())
    }

    async fn consume(
        &self,
        _token_fingerprint: &str,
        _now: DateTime<Utc>,
    ) -> Result<Option<PendingVerification>, DomainError> {
        Err(outage())
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Err(outage())
    }

    async fn count_live_for_email(
        &self,
        _email: &str,
        _now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        Err(outage())
    }
}

fn outage() -> DomainError {
    DomainError::StorageUnavailable {
        message: "connection refused".to_string(),
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

struct Harness<P: PendingVerificationRepository> {
    state: web::Data<AppState<P, InMemoryConfirmedEmailRepository>>,
    mailer: Arc<RecordingMailer>,
    clock: Arc<ManualClock>,
    confirmed: Arc<InMemoryConfirmedEmailRepository>,
}

fn harness_with<P: PendingVerificationRepository + 'static>(pending: Arc<P>) -> Harness<P> {
    let confirmed = Arc::new(InMemoryConfirmedEmailRepository::new());
    let clock = Arc::new(ManualClock::new(t0()));
    let mailer = Arc::new(RecordingMailer::default());
    let config = VerificationConfig::default();

    let service = Arc::new(VerificationService::with_clock(
        pending,
        confirmed.clone(),
        clock.clone(),
        VerificationServiceConfig::from(&config),
    ));

    Harness {
        state: web::Data::new(AppState::new(service, mailer.clone(), config)),
        mailer,
        clock,
        confirmed,
    }
}

fn harness() -> Harness<InMemoryPendingVerificationRepository> {
    harness_with(Arc::new(InMemoryPendingVerificationRepository::new()))
}

/// Wait for the spawned delivery task to hand the message to the mailer
async fn wait_for_mail(mailer: &RecordingMailer) -> OutboundEmail {
    for _ in 0..100 {
        if let Some(message) = mailer.sent().pop() {
            return message;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("no verification email was sent");
}

/// Path of the verification link inside a mailed body
fn link_path(body: &str) -> String {
    let start = body.find("/api/v1/verify/").expect("link in body");
    body[start..]
        .split_whitespace()
        .next()
        .unwrap()
        .to_string()
}

fn token_from_path(path: &str) -> String {
    path.trim_start_matches("/api/v1/verify/").to_string()
}

#[actix_web::test]
async fn test_request_returns_accepted_without_token() {
    let h = harness();
    let app = test::init_service(create_app(
        h.state.clone(),
        &ServerConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/request")
        .set_json(json!({ "email": "User@Example.com " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["expires_in"], 1800);

    let message = wait_for_mail(&h.mailer).await;
    assert_eq!(message.recipient, "user@example.com");

    let token = token_from_path(&link_path(&message.body));
    assert!(!token.is_empty());
    assert!(!body.to_string().contains(&token));
}

#[actix_web::test]
async fn test_mailed_link_confirms_email_once() {
    let h = harness();
    let app = test::init_service(create_app(
        h.state.clone(),
        &ServerConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/request")
        .set_json(json!({ "email": "user@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let path = link_path(&wait_for_mail(&h.mailer).await.body);

    let req = test::TestRequest::get().uri(&path).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "user@example.com");
    assert!(h
        .confirmed
        .find_by_email("user@example.com")
        .await
        .unwrap()
        .is_some());

    // Second use of the same link
    let req = test::TestRequest::get().uri(&path).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "INVALID_OR_EXPIRED");
}

#[actix_web::test]
async fn test_redeem_with_json_body() {
    let h = harness();
    let app = test::init_service(create_app(
        h.state.clone(),
        &ServerConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/request")
        .set_json(json!({ "email": "user@example.com" }))
        .to_request();
    test::call_service(&app, req).await;
    let token = token_from_path(&link_path(&wait_for_mail(&h.mailer).await.body));

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/redeem")
        .set_json(json!({ "token": format!(" {}\n", token) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_expired_link_is_rejected() {
    let h = harness();
    let app = test::init_service(create_app(
        h.state.clone(),
        &ServerConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/request")
        .set_json(json!({ "email": "user@example.com" }))
        .to_request();
    test::call_service(&app, req).await;
    let path = link_path(&wait_for_mail(&h.mailer).await.body);

    h.clock.advance(Duration::minutes(30) + Duration::seconds(1));

    let req = test::TestRequest::get().uri(&path).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "INVALID_OR_EXPIRED");
}

#[actix_web::test]
async fn test_invalid_email_is_rejected() {
    let h = harness();
    let app = test::init_service(create_app(
        h.state.clone(),
        &ServerConfig::default(),
        Environment::Development,
    ))
    .await;

    for email in ["", "not-an-email"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/verification/request")
            .set_json(json!({ "email": email }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "email {:?}", email);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    assert!(h.mailer.sent().is_empty());
}

#[actix_web::test]
async fn test_unknown_and_blank_tokens_are_rejected() {
    let h = harness();
    let app = test::init_service(create_app(
        h.state.clone(),
        &ServerConfig::default(),
        Environment::Development,
    ))
    .await;

    for token in ["", "   ", "definitely-not-issued"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/verification/redeem")
            .set_json(json!({ "token": token }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "token {:?}", token);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_OR_EXPIRED");
    }
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let h = harness();
    let app = test::init_service(create_app(
        h.state.clone(),
        &ServerConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/redeem")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_storage_outage_is_service_unavailable() {
    let h = harness_with(Arc::new(DownPendingRepository));
    let app = test::init_service(create_app(
        h.state.clone(),
        &ServerConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/request")
        .set_json(json!({ "email": "user@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "STORAGE_UNAVAILABLE");
    assert!(!body.to_string().contains("connection refused"));

    let req = test::TestRequest::get()
        .uri("/api/v1/verify/some-token")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    assert!(h.mailer.sent().is_empty());
}

#[actix_web::test]
async fn test_health_and_not_found() {
    let h = harness();
    let app = test::init_service(create_app(
        h.state.clone(),
        &ServerConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "healthy");

    let req = test::TestRequest::get().uri("/api/v1/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
