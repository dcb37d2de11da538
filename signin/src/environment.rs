//! Sign-in environment.
//!
//! Bundles the injected capabilities the reducer's effects call into.

use crate::providers::{Authenticator, Navigator, Notifier, SessionPersister};

/// Capabilities available to the sign-in reducer.
///
/// # Type Parameters
///
/// - `A`: Authenticator
/// - `P`: Session persister
/// - `N`: Navigator
/// - `T`: Notifier
#[derive(Debug, Clone)]
pub struct SignInEnvironment<A, P, N, T>
where
    A: Authenticator,
    P: SessionPersister,
    N: Navigator,
    T: Notifier,
{
    /// Credential verification.
    pub authenticator: A,
    /// Session persistence.
    pub sessions: P,
    /// Route changes.
    pub navigator: N,
    /// User notifications.
    pub notifier: T,
}

impl<A, P, N, T> SignInEnvironment<A, P, N, T>
where
    A: Authenticator,
    P: SessionPersister,
    N: Navigator,
    T: Notifier,
{
    /// Create a new sign-in environment.
    #[must_use]
    pub const fn new(authenticator: A, sessions: P, navigator: N, notifier: T) -> Self {
        Self {
            authenticator,
            sessions,
            navigator,
            notifier,
        }
    }
}
