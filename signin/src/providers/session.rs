//! Session persistence capability.

use crate::error::Result;
use crate::state::{SessionToken, UserProfile};
use std::future::Future;

/// Client-side session storage.
///
/// Called once per successful sign-in, before the success notification.
pub trait SessionPersister: Send + Sync {
    /// Store the session token and user profile.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The storage medium cannot be written → `SignInError::SessionStorage`
    /// - The session cannot be encoded → `SignInError::Serialization`
    fn persist(
        &self,
        token: &SessionToken,
        user: &UserProfile,
    ) -> impl Future<Output = Result<()>> + Send;
}
