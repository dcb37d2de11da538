//! HTTP authenticator backed by the storefront sign-in endpoint.

use crate::config::SignInConfig;
use crate::constants::TIMEOUT_MESSAGE;
use crate::error::{Result, SignInError};
use crate::providers::Authenticator;
use crate::state::{
    AuthFailure, AuthOutcome, Authenticated, Credentials, SessionToken, UserProfile,
};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// Response envelope of the sign-in endpoint.
///
/// Success carries `data`; failure carries `error` (or nothing at all).
#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(default)]
    data: Option<SignInData>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct SignInData {
    sign_in: String,
    user: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Authenticator that posts credentials as JSON to the sign-in endpoint.
///
/// The HTTP status is not trusted on its own: the endpoint reports failures
/// in the body, so every response body is decoded and classified.
#[derive(Debug, Clone)]
pub struct HttpAuthenticator {
    client: Client,
    endpoint: String,
}

impl HttpAuthenticator {
    /// Create an authenticator for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `SignInError::HttpClient` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SignInError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Create an authenticator from the form configuration.
    ///
    /// # Errors
    ///
    /// Returns `SignInError::HttpClient` if the HTTP client cannot be built.
    pub fn from_config(config: &SignInConfig) -> Result<Self> {
        Self::new(config.endpoint.clone(), config.auth_timeout)
    }

    /// The endpoint credentials are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[tracing::instrument(skip(self, credentials), fields(endpoint = %self.endpoint))]
    async fn sign_in(&self, credentials: &Credentials) -> AuthOutcome {
        let response = match self
            .client
            .post(&self.endpoint)
            .json(credentials)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Err(transport_failure(&e)),
        };

        let status = response.status();
        let body = match response.json::<SignInResponse>().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return Err(transport_failure(&e)),
            Err(e) => {
                tracing::warn!(%status, error = %e, "Sign-in response was not a JSON envelope");
                return Err(AuthFailure::new(None));
            },
        };

        classify(body).inspect_err(|failure| {
            tracing::debug!(%status, message = ?failure.message(), "Sign-in rejected");
        })
    }
}

impl Authenticator for HttpAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> impl Future<Output = AuthOutcome> + Send {
        self.sign_in(credentials)
    }
}

fn classify(body: SignInResponse) -> AuthOutcome {
    match body.data {
        Some(data) => Ok(Authenticated {
            session: SessionToken::new(data.sign_in),
            user: UserProfile::new(data.user),
        }),
        None => Err(AuthFailure::new(body.error.and_then(|e| e.message))),
    }
}

fn transport_failure(error: &reqwest::Error) -> AuthFailure {
    if error.is_timeout() {
        tracing::warn!(error = %error, "Sign-in request timed out");
        AuthFailure::with_message(TIMEOUT_MESSAGE)
    } else {
        tracing::warn!(error = %error, "Sign-in request failed");
        AuthFailure::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AuthOutcome {
        match serde_json::from_str::<SignInResponse>(json) {
            Ok(body) => classify(body),
            Err(_) => Err(AuthFailure::new(None)),
        }
    }

    #[test]
    fn test_classify_success() {
        let outcome = parse(r#"{"data":{"sign_in":"tok","user":{"id":7}}}"#);
        assert!(matches!(outcome, Ok(ref auth) if auth.session.as_str() == "tok"));
    }

    #[test]
    fn test_classify_error_with_message() {
        let outcome = parse(r#"{"error":{"message":"Invalid credentials"}}"#);
        assert_eq!(outcome, Err(AuthFailure::with_message("Invalid credentials")));
    }

    #[test]
    fn test_classify_missing_data_and_error() {
        assert_eq!(parse(r#"{"data":null}"#), Err(AuthFailure::new(None)));
        assert_eq!(parse(r#"{"error":{}}"#), Err(AuthFailure::new(None)));
    }

    #[test]
    fn test_incomplete_data_is_a_failure() {
        assert!(parse(r#"{"data":{"user":{}}}"#).is_err());
    }
}
