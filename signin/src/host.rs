//! Host component for one sign-in form.
//!
//! [`SignInForm`] owns a [`Store`] running the sign-in reducer and exposes
//! the operations a UI binds to: field edits, submit, a render snapshot and
//! unmount.
//!
//! # Example
//!
//! ```no_run
//! use storefront_signin::config::SignInConfig;
//! use storefront_signin::environment::SignInEnvironment;
//! use storefront_signin::host::{Mounted, SignInForm, SubmitOutcome};
//! use storefront_signin::providers::{FileSessionStore, HistoryNavigator, HttpAuthenticator, TracingNotifier};
//! use storefront_signin::state::Field;
//!
//! # async fn example() -> storefront_signin::Result<()> {
//! let config = SignInConfig::from_env()?;
//! let sessions = FileSessionStore::new(&config.session_file);
//! let env = SignInEnvironment::new(
//!     HttpAuthenticator::from_config(&config)?,
//!     sessions.clone(),
//!     HistoryNavigator::new(),
//!     TracingNotifier,
//! );
//!
//! if let Mounted::Ready(form) = SignInForm::mount(env, &sessions, &config).await {
//!     form.on_field_change(Field::Email, "user@example.com").await?;
//!     form.on_field_change(Field::Password, "hunter2").await?;
//!     if let SubmitOutcome::Failed { message } = form.submit().await? {
//!         eprintln!("{message}");
//!     }
//!     form.unmount().await?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::actions::SignInAction;
use crate::config::SignInConfig;
use crate::environment::SignInEnvironment;
use crate::error::{Result, SignInError};
use crate::providers::{AuthStatus, Authenticator, Navigator, Notifier, SessionPersister};
use crate::reducer::SignInReducer;
use crate::state::{AuthOutcome, Field, Phase, Route, SignInState};
use std::fmt;
use std::time::Duration;
use storefront_runtime::{EffectHandle, Store, StoreError};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::Mutex;

type FormStore<A, P, N, T> =
    Store<SignInState, SignInAction, SignInEnvironment<A, P, N, T>, SignInReducer<A, P, N, T>>;

/// Result of mounting a form.
pub enum Mounted<A, P, N, T>
where
    A: Authenticator + Clone + 'static,
    P: SessionPersister + Clone + 'static,
    N: Navigator + Clone + 'static,
    T: Notifier + Clone + 'static,
{
    /// The visitor is not signed in; the form is ready.
    Ready(SignInForm<A, P, N, T>),
    /// The visitor was already signed in and was sent home.
    Redirected,
}

/// How a submit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Signed in; the session was stored and the visitor sent home.
    Succeeded,
    /// Rejected; `message` is what the error notification showed.
    Failed {
        /// User-facing failure message.
        message: String,
    },
}

/// Render snapshot of the form.
#[derive(Clone, PartialEq, Eq)]
pub struct FormView {
    /// Email input value.
    pub email: String,
    /// Password input value.
    pub password: String,
    /// Attempt status.
    pub phase: Phase,
    /// Inputs are read-only while an attempt is in flight.
    pub inputs_disabled: bool,
    /// The submit button shows a spinner.
    pub submit_loading: bool,
    /// Submit button label.
    pub submit_label: &'static str,
    /// Target of the "forgot password" link.
    pub forgot_password: Route,
    /// Target of the "sign up" link.
    pub sign_up: Route,
}

impl FormView {
    fn from_state(state: &SignInState) -> Self {
        let submitting = state.phase == Phase::Submitting;
        Self {
            email: state.email.clone(),
            password: state.password.clone(),
            phase: state.phase,
            inputs_disabled: submitting,
            submit_loading: submitting,
            submit_label: if submitting { "Submitting" } else { "Sign in" },
            forgot_password: Route::ForgotPassword,
            sign_up: Route::SignUp,
        }
    }
}

impl fmt::Debug for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormView")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("phase", &self.phase)
            .field("inputs_disabled", &self.inputs_disabled)
            .field("submit_loading", &self.submit_loading)
            .field("submit_label", &self.submit_label)
            .finish_non_exhaustive()
    }
}

/// One mounted sign-in form.
pub struct SignInForm<A, P, N, T>
where
    A: Authenticator + Clone + 'static,
    P: SessionPersister + Clone + 'static,
    N: Navigator + Clone + 'static,
    T: Notifier + Clone + 'static,
{
    store: FormStore<A, P, N, T>,
    /// Handle of the attempt most recently started, shared with submits
    /// that arrive while it is in flight.
    attempt: Mutex<Option<EffectHandle>>,
    submit_timeout: Duration,
    shutdown_timeout: Duration,
}

impl<A, P, N, T> SignInForm<A, P, N, T>
where
    A: Authenticator + Clone + 'static,
    P: SessionPersister + Clone + 'static,
    N: Navigator + Clone + 'static,
    T: Notifier + Clone + 'static,
{
    /// Mount a form.
    ///
    /// Queries `status` once: an already signed-in visitor is navigated
    /// home and no form is created.
    #[tracing::instrument(skip_all)]
    pub async fn mount<S: AuthStatus>(
        env: SignInEnvironment<A, P, N, T>,
        status: &S,
        config: &SignInConfig,
    ) -> Mounted<A, P, N, T> {
        if status.is_authenticated().await {
            tracing::info!("Visitor already signed in, redirecting home");
            env.navigator.navigate(Route::Home);
            return Mounted::Redirected;
        }

        let store = Store::with_config(
            SignInState::default(),
            SignInReducer::from_config(config),
            env,
            config.store.clone(),
        );

        tracing::debug!("Sign-in form mounted");
        Mounted::Ready(Self {
            store,
            attempt: Mutex::new(None),
            submit_timeout: config.submit_timeout(),
            shutdown_timeout: config.store.shutdown_timeout,
        })
    }

    /// Edit a field.
    ///
    /// # Errors
    ///
    /// Returns `SignInError::Store` if the form is being unmounted.
    pub async fn on_field_change(&self, field: Field, value: impl Into<String>) -> Result<()> {
        self.store
            .send(SignInAction::FieldChanged {
                field,
                value: value.into(),
            })
            .await?;
        Ok(())
    }

    /// Submit the form and wait for the outcome.
    ///
    /// Resolves once the authenticator answered and the outcome's follow-up
    /// effects finished. A submit while an attempt is in flight starts no new
    /// attempt; it resolves with the in-flight attempt's outcome once that
    /// attempt's follow-up effects finished.
    ///
    /// Authentication failures are `Ok(SubmitOutcome::Failed)`, never errors.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The form is being unmounted → `SignInError::Store`
    /// - No outcome arrives within the submit timeout → `SignInError::SubmitTimedOut`
    #[tracing::instrument(skip(self))]
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        // Subscribe before sending so the response cannot be missed
        let mut actions = self.store.subscribe_actions();
        let mut handle = self.join_attempt().await?;
        let deadline = self.submit_timeout;

        let outcome = tokio::time::timeout(deadline, async {
            let outcome = next_auth_response(&mut actions).await?;
            handle.wait().await;
            Ok::<_, StoreError>(outcome)
        })
        .await
        .map_err(|_| {
            tracing::warn!(?deadline, "Submit did not complete in time");
            SignInError::SubmitTimedOut(deadline)
        })??;

        Ok(match outcome {
            Ok(_) => SubmitOutcome::Succeeded,
            Err(failure) => SubmitOutcome::Failed {
                message: failure.message_or_default().to_string(),
            },
        })
    }

    /// Send `Submit` and return the handle of the attempt it belongs to.
    ///
    /// A submit that started an attempt has spawned the authenticator call;
    /// one that was ignored gets the in-flight attempt's handle instead.
    async fn join_attempt(&self) -> Result<EffectHandle> {
        let mut attempt = self.attempt.lock().await;
        let handle = self.store.send_cascading(SignInAction::Submit).await?;

        if handle.has_started() {
            *attempt = Some(handle.clone());
            return Ok(handle);
        }

        tracing::debug!("Joining the in-flight attempt");
        Ok(attempt.clone().unwrap_or(handle))
    }

    /// Snapshot of what the form renders.
    pub async fn view(&self) -> FormView {
        self.store.state(FormView::from_state).await
    }

    /// Current attempt state.
    pub async fn state(&self) -> SignInState {
        self.store.state(SignInState::clone).await
    }

    /// Unmount the form, waiting for running effects.
    ///
    /// # Errors
    ///
    /// Returns `SignInError::Store` if effects are still running when the
    /// store's shutdown timeout elapses.
    pub async fn unmount(self) -> Result<()> {
        self.store.shutdown(self.shutdown_timeout).await?;
        tracing::debug!("Sign-in form unmounted");
        Ok(())
    }
}

async fn next_auth_response(
    actions: &mut tokio::sync::broadcast::Receiver<SignInAction>,
) -> std::result::Result<AuthOutcome, StoreError> {
    loop {
        match actions.recv().await {
            Ok(SignInAction::AuthResponse(outcome)) => return Ok(outcome),
            Ok(_) => {},
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Submit observer lagged");
            },
            Err(RecvError::Closed) => return Err(StoreError::ChannelClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_while_submitting() {
        let view = FormView::from_state(&SignInState {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
            phase: Phase::Submitting,
        });

        assert!(view.inputs_disabled);
        assert!(view.submit_loading);
        assert_eq!(view.submit_label, "Submitting");
        assert!(!format!("{view:?}").contains("hunter2"));
    }

    #[test]
    fn test_view_links() {
        let view = FormView::from_state(&SignInState::default());

        assert!(!view.inputs_disabled);
        assert_eq!(view.submit_label, "Sign in");
        assert_eq!(view.forgot_password.path(), "/account/forgotpassword");
        assert_eq!(view.sign_up.path(), "/e/signup");
    }
}
