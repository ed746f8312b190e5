//! Integration tests for the endpoint resolver client

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use checkin_client::{
    ClientConfig, DomainRegistration, ResolverClient, ResolverError, SessionStore, ValidationError,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver(server: &MockServer, session: SessionStore) -> ResolverClient {
    let config = ClientConfig {
        resolver_url: server.uri(),
        ..ClientConfig::default()
    };
    ResolverClient::new(&config, session).unwrap()
}

#[tokio::test]
async fn resolve_stores_endpoint_and_branding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_json(json!({ "domain": "hagl", "passcode": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "endpoint": "https://hagl.example",
            "clubName": "HAGL",
            "logo": "https://hagl.example/logo.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    let resolution = resolver(&server, session.clone())
        .resolve(" hagl ", "123456")
        .await
        .unwrap();

    assert_eq!(resolution.endpoint, "https://hagl.example");
    let tenant = session.snapshot().await.tenant;
    assert_eq!(tenant.endpoint.as_deref(), Some("https://hagl.example"));
    assert_eq!(tenant.club_name.as_deref(), Some("HAGL"));
    assert_eq!(tenant.logo.as_deref(), Some("https://hagl.example/logo.png"));
}

#[tokio::test]
async fn blank_fields_are_rejected_without_a_request() {
    let server = MockServer::start().await;
    let client = resolver(&server, SessionStore::in_memory());

    let error = client.resolve("hagl", "  ").await.unwrap_err();
    assert!(matches!(error, ResolverError::MissingFields));
    assert_eq!(error.to_string(), "domain and passcode are required");

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn short_passcode_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    let session = SessionStore::in_memory();
    let client = resolver(&server, session.clone());

    let error = client.resolve("hagl", "12345").await.unwrap_err();
    assert!(matches!(
        error,
        ResolverError::Invalid(ValidationError::PasscodeTooShort)
    ));
    assert_eq!(error.to_string(), "passcode must be at least 6 characters");

    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(session.snapshot().await.tenant.endpoint, None);
}

#[tokio::test]
async fn domain_registration_needs_a_numeric_passcode() {
    let server = MockServer::start().await;
    let client = resolver(&server, SessionStore::in_memory());
    let registration = |passcode: &str| DomainRegistration {
        club_name: "HAGL".into(),
        domain: "hagl".into(),
        passcode: passcode.into(),
    };

    let error = client.register_domain(&registration("12ab56")).await.unwrap_err();
    assert!(matches!(
        error,
        ResolverError::Invalid(ValidationError::PasscodeNotNumeric)
    ));
    let error = client.register_domain(&registration("1234")).await.unwrap_err();
    assert!(matches!(
        error,
        ResolverError::Invalid(ValidationError::PasscodeTooShort)
    ));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn refusal_prefers_error_then_message_then_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "error": "unknown domain", "message": "nope" })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad passcode" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "clubName": "HAGL" })))
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    let client = resolver(&server, session.clone());

    let first = client.resolve("hagl", "123456").await.unwrap_err();
    assert_eq!(first.to_string(), "unknown domain");

    let second = client.resolve("hagl", "123456").await.unwrap_err();
    assert_eq!(second.to_string(), "bad passcode");

    // Success status without an endpoint is still a refusal
    let third = client.resolve("hagl", "123456").await.unwrap_err();
    assert_eq!(third.to_string(), "no valid endpoint found");

    assert_eq!(session.snapshot().await.tenant.endpoint, None);
    assert_eq!(session.snapshot().await.tenant.club_name, None);
}

#[tokio::test]
async fn unreachable_resolver_asks_to_retry() {
    let server = MockServer::start().await;
    let client = resolver(&server, SessionStore::in_memory());
    drop(server);

    let error = client.resolve("hagl", "123456").await.unwrap_err();
    assert!(matches!(error, ResolverError::Transport(_)));
    assert_eq!(error.to_string(), "please try again");
}

#[tokio::test]
async fn register_domain_reports_server_message_or_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({ "club_name": "HAGL", "domain": "hagl", "passcode": "123456" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "created" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = resolver(&server, SessionStore::in_memory());
    let registration = DomainRegistration {
        club_name: "HAGL".into(),
        domain: "hagl".into(),
        passcode: "123456".into(),
    };

    let message = client.register_domain(&registration).await.unwrap();
    assert_eq!(message.as_deref(), Some("created"));

    let error = client.register_domain(&registration).await.unwrap_err();
    assert_eq!(error.to_string(), "registration failed");
}

#[tokio::test]
async fn delete_domain_signs_out() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/delete"))
        .and(body_json(json!({ "domain": "hagl" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    session.sign_in("tok".into(), None).await;
    session.set_endpoint("https://hagl.example".into()).await;

    resolver(&server, session.clone()).delete_domain("hagl").await.unwrap();

    assert!(!session.is_authenticated().await);
}
