//! Sign-in flow constants.

use std::time::Duration;

/// Message shown when a failure carries no message of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// Message shown after a successful sign-in.
pub const SUCCESS_MESSAGE: &str = "Successfully signed in";

/// Failure message when the authenticator does not answer in time.
pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Success notifications close after 5 seconds.
pub const SUCCESS_AUTO_CLOSE: Duration = Duration::from_millis(5000);

/// Error notifications close after 2 seconds.
pub const ERROR_AUTO_CLOSE: Duration = Duration::from_millis(2000);

/// Default bound on a single authenticator call.
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the authentication endpoint URL.
pub const ENV_SIGNIN_URL: &str = "STOREFRONT_SIGNIN_URL";

/// Environment variable holding the authenticator timeout in seconds.
pub const ENV_AUTH_TIMEOUT_SECS: &str = "STOREFRONT_AUTH_TIMEOUT_SECS";

/// Environment variable holding the session file path.
pub const ENV_SESSION_FILE: &str = "STOREFRONT_SESSION_FILE";
