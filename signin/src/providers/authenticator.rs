//! Authentication capabilities.

use crate::state::{AuthOutcome, Credentials};
use std::future::Future;

/// Credential verification.
///
/// # Implementation Notes
///
/// - Never fails: transport errors, malformed responses and rejections are
///   all normalized into the `Err` arm of [`AuthOutcome`]
/// - A failure without a message is shown as the default error message
pub trait Authenticator: Send + Sync {
    /// Verify credentials.
    ///
    /// # Returns
    ///
    /// `Ok(Authenticated)` with the session token and user profile, or
    /// `Err(AuthFailure)` with an optional message.
    fn authenticate(&self, credentials: &Credentials) -> impl Future<Output = AuthOutcome> + Send;
}

/// Already-authenticated check.
///
/// Queried once when a form mounts. An authenticated visitor is sent home
/// instead of seeing the form.
pub trait AuthStatus: Send + Sync {
    /// Whether a session already exists.
    fn is_authenticated(&self) -> impl Future<Output = bool> + Send;
}
