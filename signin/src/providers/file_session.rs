//! File-backed session storage.

use crate::error::{Result, SignInError};
use crate::providers::{AuthStatus, SessionPersister};
use crate::state::{SessionToken, StoredSession, UserProfile};
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use storefront_core::environment::{Clock, SystemClock};

/// Session store that keeps one [`StoredSession`] as a JSON file.
///
/// Doubles as the [`AuthStatus`] capability: a visitor counts as signed in
/// while the file holds a session with a non-empty token.
#[derive(Debug, Clone)]
pub struct FileSessionStore<C: Clock = SystemClock> {
    path: PathBuf,
    clock: C,
}

impl FileSessionStore {
    /// Create a store at `path` using the system clock.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }
}

impl<C: Clock> FileSessionStore<C> {
    /// Create a store at `path` that stamps sessions with `clock`.
    #[must_use]
    pub fn with_clock(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session.
    ///
    /// Returns `Ok(None)` when no session file exists.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The file exists but cannot be read → `SignInError::SessionStorage`
    /// - The file is not a valid session → `SignInError::Serialization`
    pub async fn load(&self) -> Result<Option<StoredSession>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(&self.path, &e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| SignInError::Serialization(e.to_string()))
    }

    /// Remove the stored session (sign out).
    ///
    /// # Errors
    ///
    /// Returns `SignInError::SessionStorage` if the file exists but cannot be removed.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(&self.path, &e)),
        }
    }

    async fn write(&self, token: &SessionToken, user: &UserProfile) -> Result<()> {
        let stored = StoredSession {
            token: token.clone(),
            user: user.clone(),
            stored_at: self.clock.now(),
        };
        let bytes = serde_json::to_vec_pretty(&stored)
            .map_err(|e| SignInError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error(parent, &e))?;
        }

        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| storage_error(&self.path, &e))?;

        tracing::debug!(path = %self.path.display(), "Session persisted");
        Ok(())
    }

    async fn has_session(&self) -> bool {
        match self.load().await {
            Ok(stored) => stored.is_some_and(|s| !s.token.is_empty()),
            Err(error) => {
                tracing::warn!(%error, "Ignoring unreadable session file");
                false
            },
        }
    }
}

impl<C: Clock> SessionPersister for FileSessionStore<C> {
    fn persist(
        &self,
        token: &SessionToken,
        user: &UserProfile,
    ) -> impl Future<Output = Result<()>> + Send {
        self.write(token, user)
    }
}

impl<C: Clock> AuthStatus for FileSessionStore<C> {
    fn is_authenticated(&self) -> impl Future<Output = bool> + Send {
        self.has_session()
    }
}

fn storage_error(path: &Path, error: &std::io::Error) -> SignInError {
    SignInError::SessionStorage(format!("{}: {error}", path.display()))
}
