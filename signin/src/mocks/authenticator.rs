//! Mock authenticator for testing.

use crate::providers::Authenticator;
use crate::state::{AuthFailure, AuthOutcome, Authenticated, Credentials, SessionToken, UserProfile};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Mock authenticator.
///
/// Answers with scripted outcomes in order, then with the fallback outcome.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    scripted: Arc<Mutex<VecDeque<AuthOutcome>>>,
    fallback: AuthOutcome,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<Credentials>>>,
}

impl MockAuthenticator {
    /// Create a mock that always answers with `outcome`.
    #[must_use]
    pub fn new(outcome: AuthOutcome) -> Self {
        Self {
            scripted: Arc::new(Mutex::new(VecDeque::new())),
            fallback: outcome,
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that accepts every credential.
    #[must_use]
    pub fn succeeding(token: &str, user: serde_json::Value) -> Self {
        Self::new(Ok(Authenticated {
            session: SessionToken::new(token),
            user: UserProfile::new(user),
        }))
    }

    /// Create a mock that rejects every credential.
    #[must_use]
    pub fn failing(message: Option<&str>) -> Self {
        Self::new(Err(AuthFailure::new(message.map(str::to_string))))
    }

    /// Answer only after `delay`.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue an outcome ahead of the fallback.
    pub fn push_outcome(&self, outcome: AuthOutcome) {
        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    /// Credentials of every call, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Credentials> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Authenticator for MockAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> impl Future<Output = AuthOutcome> + Send {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(credentials.clone());

        let outcome = self
            .scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            outcome
        }
    }
}
