//! Sign-in configuration.
//!
//! Values are provided by the application (or the environment), not
//! hardcoded in the flow.

use crate::constants::{
    DEFAULT_AUTH_TIMEOUT, ENV_AUTH_TIMEOUT_SECS, ENV_SESSION_FILE, ENV_SIGNIN_URL,
    ERROR_AUTO_CLOSE, SUCCESS_AUTO_CLOSE,
};
use crate::error::{Result, SignInError};
use std::path::PathBuf;
use std::time::Duration;
use storefront_runtime::StoreConfig;

/// Configuration for one sign-in form.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use storefront_signin::config::SignInConfig;
///
/// let config = SignInConfig::new("https://shop.example.com/api/signin")
///     .with_auth_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.submit_timeout(), Duration::from_secs(15));
/// ```
#[derive(Debug, Clone)]
pub struct SignInConfig {
    /// URL the HTTP authenticator posts credentials to.
    pub endpoint: String,

    /// Upper bound on one authenticator call.
    ///
    /// When it elapses the attempt fails with "Request timed out".
    ///
    /// Default: 30 seconds
    pub auth_timeout: Duration,

    /// Extra time the host waits beyond `auth_timeout` for the outcome and
    /// its follow-up effects.
    ///
    /// Default: 5 seconds
    pub submit_grace: Duration,

    /// How long the success notification stays visible.
    ///
    /// Default: 5 seconds
    pub success_auto_close: Duration,

    /// How long the error notification stays visible.
    ///
    /// Default: 2 seconds
    pub error_auto_close: Duration,

    /// Where the file session store keeps the session.
    ///
    /// Default: `.storefront/session.json`
    pub session_file: PathBuf,

    /// Runtime settings for the form's store.
    pub store: StoreConfig,
}

impl SignInConfig {
    /// Create configuration for the given authentication endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the process environment.
    ///
    /// Reads `STOREFRONT_SIGNIN_URL`, `STOREFRONT_AUTH_TIMEOUT_SECS` and
    /// `STOREFRONT_SESSION_FILE`; unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `SignInError::Config` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `SignInError::Config` if a value is unusable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_SIGNIN_URL) {
            let endpoint = endpoint.trim();
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(config_error(ENV_SIGNIN_URL, "expected an http(s) URL"));
            }
            config.endpoint = endpoint.to_string();
        }

        if let Some(secs) = lookup(ENV_AUTH_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| config_error(ENV_AUTH_TIMEOUT_SECS, &e.to_string()))?;
            if secs == 0 {
                return Err(config_error(ENV_AUTH_TIMEOUT_SECS, "must be at least 1"));
            }
            config.auth_timeout = Duration::from_secs(secs);
        }

        if let Some(path) = lookup(ENV_SESSION_FILE).filter(|p| !p.trim().is_empty()) {
            config.session_file = PathBuf::from(path);
        }

        Ok(config)
    }

    /// How long the host waits for a submit to finish.
    #[must_use]
    pub fn submit_timeout(&self) -> Duration {
        self.auth_timeout.saturating_add(self.submit_grace)
    }

    /// Set the authenticator timeout.
    #[must_use]
    pub const fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = timeout;
        self
    }

    /// Set the host's extra wait beyond the authenticator timeout.
    #[must_use]
    pub const fn with_submit_grace(mut self, grace: Duration) -> Self {
        self.submit_grace = grace;
        self
    }

    /// Set notification auto-close delays.
    #[must_use]
    pub const fn with_auto_close(mut self, success: Duration, error: Duration) -> Self {
        self.success_auto_close = success;
        self.error_auto_close = error;
        self
    }

    /// Set the session file location.
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    /// Set the store runtime configuration.
    #[must_use]
    pub fn with_store_config(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }
}

impl Default for SignInConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/signin".to_string(),
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
            submit_grace: Duration::from_secs(5),
            success_auto_close: SUCCESS_AUTO_CLOSE,
            error_auto_close: ERROR_AUTO_CLOSE,
            session_file: PathBuf::from(".storefront/session.json"),
            store: StoreConfig::default(),
        }
    }
}

fn config_error(key: &str, reason: &str) -> SignInError {
    SignInError::Config {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
