//! Mock session store for testing.

use crate::error::{Result, SignInError};
use crate::providers::{AuthStatus, SessionPersister};
use crate::state::{SessionToken, UserProfile};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// In-memory session store.
///
/// Records persisted sessions and answers the already-authenticated check.
#[derive(Debug, Clone, Default)]
pub struct MockSessionStore {
    persisted: Arc<Mutex<Vec<(SessionToken, UserProfile)>>>,
    authenticated: Arc<AtomicBool>,
    delay: Option<Duration>,
    /// Whether `persist` should fail.
    pub should_fail: bool,
}

impl MockSessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose visitor is already signed in.
    #[must_use]
    pub fn signed_in() -> Self {
        let store = Self::default();
        store.authenticated.store(true, Ordering::SeqCst);
        store
    }

    /// Create a store whose writes fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Make every `persist` take `delay` before it records the session.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every persisted `(token, user)` pair, oldest first.
    #[must_use]
    pub fn persisted(&self) -> Vec<(SessionToken, UserProfile)> {
        self.persisted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionPersister for MockSessionStore {
    fn persist(
        &self,
        token: &SessionToken,
        user: &UserProfile,
    ) -> impl Future<Output = Result<()>> + Send {
        let store = self.clone();
        let session = (token.clone(), user.clone());

        async move {
            if let Some(delay) = store.delay {
                tokio::time::sleep(delay).await;
            }
            if store.should_fail {
                return Err(SignInError::SessionStorage("storage unavailable".to_string()));
            }
            store
                .persisted
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(session);
            store.authenticated.store(true, Ordering::SeqCst);
            Ok(())
        }
    }
}

impl AuthStatus for MockSessionStore {
    fn is_authenticated(&self) -> impl Future<Output = bool> + Send {
        let authenticated = self.authenticated.load(Ordering::SeqCst);
        async move { authenticated }
    }
}
