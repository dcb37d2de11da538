//! Sign-in state types.
//!
//! The attempt state separates pure data (the two fields) from status
//! (the [`Phase`]). All types are `Clone` to support the reducer architecture.

use crate::constants::{DEFAULT_ERROR_MESSAGE, ERROR_AUTO_CLOSE, SUCCESS_AUTO_CLOSE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════
// Attempt State
// ═══════════════════════════════════════════════════════════════════════

/// Status of the current sign-in attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No attempt in progress and no outcome shown.
    #[default]
    Idle,
    /// The authenticator call is in flight.
    Submitting,
    /// The last attempt failed.
    Failed,
    /// The last attempt succeeded (terminal for the form).
    Succeeded,
}

impl Phase {
    /// Whether this phase records the outcome of an attempt.
    #[must_use]
    pub const fn is_outcome(self) -> bool {
        matches!(self, Self::Failed | Self::Succeeded)
    }
}

/// One of the two form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Email address input.
    Email,
    /// Password input.
    Password,
}

/// State of one mounted sign-in form.
///
/// # Examples
///
/// ```
/// use storefront_signin::state::{Phase, SignInState};
///
/// let state = SignInState::default();
/// assert_eq!(state.phase, Phase::Idle);
/// assert!(state.email.is_empty());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignInState {
    /// Email field value.
    pub email: String,
    /// Password field value.
    pub password: String,
    /// Attempt status.
    pub phase: Phase,
}

impl SignInState {
    /// Overwrite one field.
    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Email => self.email = value,
            Field::Password => self.password = value,
        }
    }

    /// Snapshot the fields as credentials for the authenticator.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for SignInState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInState")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("phase", &self.phase)
            .finish()
    }
}

/// Credentials passed to the authenticator.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Authentication Outcome
// ═══════════════════════════════════════════════════════════════════════

/// Opaque session token issued by the authentication endpoint.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Opaque user profile returned alongside the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(serde_json::Value);

impl UserProfile {
    /// Wrap a profile payload.
    #[must_use]
    pub const fn new(profile: serde_json::Value) -> Self {
        Self(profile)
    }

    /// The profile payload.
    #[must_use]
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// A successful authentication: session plus user payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    /// Session token to persist.
    pub session: SessionToken,
    /// User profile to persist.
    pub user: UserProfile,
}

/// A failed authentication, possibly without a message.
///
/// Transport errors and malformed responses are normalized into this type
/// by the authenticator before they reach the reducer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthFailure {
    message: Option<String>,
}

impl AuthFailure {
    /// Create a failure; empty messages count as absent.
    #[must_use]
    pub fn new(message: Option<String>) -> Self {
        Self {
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// Create a failure with a message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self::new(Some(message.into()))
    }

    /// The message supplied by the authenticator, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The message to show the user.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront_signin::state::AuthFailure;
    ///
    /// assert_eq!(AuthFailure::new(None).message_or_default(), "Something went wrong");
    /// assert_eq!(AuthFailure::with_message("Invalid credentials").message_or_default(), "Invalid credentials");
    /// ```
    #[must_use]
    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_ERROR_MESSAGE)
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_or_default())
    }
}

impl std::error::Error for AuthFailure {}

/// Result of one authenticator call.
pub type AuthOutcome = Result<Authenticated, AuthFailure>;

// ═══════════════════════════════════════════════════════════════════════
// Navigation and Notifications
// ═══════════════════════════════════════════════════════════════════════

/// Destinations reachable from the sign-in form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Storefront home page.
    Home,
    /// Password recovery page.
    ForgotPassword,
    /// Account registration page.
    SignUp,
}

impl Route {
    /// The route's path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::ForgotPassword => "/account/forgotpassword",
            Self::SignUp => "/e/signup",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Kind of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Positive confirmation.
    Success,
    /// Failure report.
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Kind of message.
    pub kind: NotificationKind,
    /// Text shown to the user.
    pub message: String,
    /// How long the message stays visible.
    pub auto_close: Duration,
}

impl Notification {
    /// A success notification with the default auto-close delay.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            auto_close: SUCCESS_AUTO_CLOSE,
        }
    }

    /// An error notification with the default auto-close delay.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            auto_close: ERROR_AUTO_CLOSE,
        }
    }

    /// Override the auto-close delay.
    #[must_use]
    pub const fn with_auto_close(mut self, auto_close: Duration) -> Self {
        self.auto_close = auto_close;
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Persisted Session
// ═══════════════════════════════════════════════════════════════════════

/// A session as written to client-side storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Session token.
    pub token: SessionToken,
    /// User profile.
    pub user: UserProfile,
    /// When the session was stored.
    pub stored_at: DateTime<Utc>,
}
