//! Integration tests for the HTTP authenticator against a mock endpoint.

use serde_json::json;
use std::time::Duration;
use storefront_signin::providers::{Authenticator, HttpAuthenticator};
use storefront_signin::state::{AuthFailure, Credentials};
use storefront_signin::SignInError;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials {
        email: "user@example.com".to_string(),
        password: "hunter2".to_string(),
    }
}

async fn authenticator(server: &MockServer) -> Result<HttpAuthenticator, SignInError> {
    HttpAuthenticator::new(format!("{}/api/signin", server.uri()), Duration::from_secs(2))
}

#[tokio::test]
async fn test_success_response() -> Result<(), SignInError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/signin"))
        .and(body_json(json!({ "email": "user@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "sign_in": "tok", "user": { "id": 1, "name": "Ada" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = authenticator(&server).await?.authenticate(&credentials()).await;

    match outcome {
        Ok(auth) => {
            assert_eq!(auth.session.as_str(), "tok");
            assert_eq!(auth.user.as_value()["name"], "Ada");
        },
        Err(failure) => unreachable!("expected success, got {failure}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_error_with_message() -> Result<(), SignInError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Invalid credentials" }
        })))
        .mount(&server)
        .await;

    let outcome = authenticator(&server).await?.authenticate(&credentials()).await;

    assert_eq!(outcome, Err(AuthFailure::with_message("Invalid credentials")));
    Ok(())
}

#[tokio::test]
async fn test_error_without_message() -> Result<(), SignInError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": {} })))
        .mount(&server)
        .await;

    let outcome = authenticator(&server).await?.authenticate(&credentials()).await;

    let failure = outcome.err();
    assert_eq!(failure.as_ref().and_then(AuthFailure::message), None);
    assert_eq!(
        failure.map(|f| f.message_or_default().to_string()).as_deref(),
        Some("Something went wrong")
    );
    Ok(())
}

#[tokio::test]
async fn test_non_json_server_error() -> Result<(), SignInError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let outcome = authenticator(&server).await?.authenticate(&credentials()).await;

    assert_eq!(outcome, Err(AuthFailure::new(None)));
    Ok(())
}

#[tokio::test]
async fn test_request_timeout() -> Result<(), SignInError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "sign_in": "tok", "user": {} } }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let authenticator =
        HttpAuthenticator::new(format!("{}/api/signin", server.uri()), Duration::from_millis(100))?;
    let outcome = authenticator.authenticate(&credentials()).await;

    assert_eq!(outcome, Err(AuthFailure::with_message("Request timed out")));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint() -> Result<(), SignInError> {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let authenticator = HttpAuthenticator::new(format!("{uri}/api/signin"), Duration::from_secs(2))?;
    let outcome = authenticator.authenticate(&credentials()).await;

    assert_eq!(outcome, Err(AuthFailure::new(None)));
    Ok(())
}
