//! Error types for the sign-in infrastructure.
//!
//! Authentication failures are not errors here: they are the `Err` arm of
//! [`AuthOutcome`](crate::state::AuthOutcome) and flow through the state
//! machine. `SignInError` covers what can go wrong around it.

use std::time::Duration;
use storefront_runtime::StoreError;
use thiserror::Error;

/// Result type alias for sign-in infrastructure operations.
pub type Result<T> = std::result::Result<T, SignInError>;

/// Failures of configuration, providers and the host runtime.
#[derive(Debug, Error)]
pub enum SignInError {
    /// A configuration value could not be used.
    #[error("Invalid configuration for {key}: {reason}")]
    Config {
        /// Configuration key (usually an environment variable)
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    /// Reading or writing the stored session failed.
    #[error("Session storage error: {0}")]
    SessionStorage(String),

    /// A stored session could not be encoded or decoded.
    #[error("Session serialization error: {0}")]
    Serialization(String),

    /// The form's store rejected or lost an action.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No outcome arrived within the submit timeout.
    #[error("Sign-in did not complete within {0:?}")]
    SubmitTimedOut(Duration),
}

impl SignInError {
    /// Returns `true` if retrying the same operation may succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use storefront_signin::SignInError;
    /// # use std::time::Duration;
    /// assert!(SignInError::SubmitTimedOut(Duration::from_secs(1)).is_transient());
    /// assert!(!SignInError::HttpClient("tls".into()).is_transient());
    /// ```
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::SessionStorage(_) | Self::SubmitTimedOut(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let error = SignInError::Config {
            key: "STOREFRONT_AUTH_TIMEOUT_SECS".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration for STOREFRONT_AUTH_TIMEOUT_SECS: invalid digit found in string"
        );
    }

    #[test]
    fn test_store_error_is_transparent() {
        let error = SignInError::from(StoreError::ShutdownInProgress);
        assert_eq!(error.to_string(), "Store is shutting down");
        assert!(!error.is_transient());
    }
}
