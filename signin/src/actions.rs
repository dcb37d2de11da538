//! Sign-in actions.
//!
//! Actions are the inputs to the sign-in reducer: user intents from the
//! form plus the authenticator result fed back by the runtime.

use crate::state::{AuthOutcome, Field};

/// Inputs to the sign-in reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum SignInAction {
    /// A form field was edited.
    FieldChanged {
        /// Which field.
        field: Field,
        /// The field's new value.
        value: String,
    },

    /// The user submitted the form.
    Submit,

    /// The authenticator answered (effect result).
    AuthResponse(AuthOutcome),
}

impl SignInAction {
    /// Shorthand for an email edit.
    #[must_use]
    pub fn email(value: impl Into<String>) -> Self {
        Self::FieldChanged {
            field: Field::Email,
            value: value.into(),
        }
    }

    /// Shorthand for a password edit.
    #[must_use]
    pub fn password(value: impl Into<String>) -> Self {
        Self::FieldChanged {
            field: Field::Password,
            value: value.into(),
        }
    }

    /// The authenticator result carried by this action, if any.
    #[must_use]
    pub const fn as_auth_response(&self) -> Option<&AuthOutcome> {
        match self {
            Self::AuthResponse(outcome) => Some(outcome),
            _ => None,
        }
    }
}
