//! Sign-in reducer.
//!
//! Implements the attempt state machine:
//!
//! ```text
//! Idle --Submit--> Submitting --Ok--> Succeeded
//!                             --Err--> Failed
//! Failed --Submit--> Submitting
//! Failed/Succeeded --FieldChanged--> Idle
//! Submitting --Submit--> Submitting (ignored)
//! ```
//!
//! # Effects
//!
//! - `Submit` starts one authenticator call, bounded by the configured
//!   timeout, that feeds back `AuthResponse`
//! - `AuthResponse(Ok)` runs persist session → success notification →
//!   navigate home, in that order
//! - `AuthResponse(Err)` shows an error notification

use crate::actions::SignInAction;
use crate::config::SignInConfig;
use crate::constants::{SUCCESS_MESSAGE, TIMEOUT_MESSAGE};
use crate::environment::SignInEnvironment;
use crate::providers::{Authenticator, Navigator, Notifier, SessionPersister};
use crate::state::{AuthFailure, Authenticated, Notification, Phase, Route, SignInState};
use std::time::Duration;
use storefront_core::effect::Effect;
use storefront_core::reducer::Reducer;
use storefront_core::{smallvec, SmallVec};

/// Sign-in reducer.
///
/// Generic over the capabilities of [`SignInEnvironment`].
#[derive(Debug, Clone)]
pub struct SignInReducer<A, P, N, T> {
    /// Upper bound on one authenticator call.
    auth_timeout: Duration,
    /// Success notification lifetime.
    success_auto_close: Duration,
    /// Error notification lifetime.
    error_auto_close: Duration,
    /// Phantom data to hold type parameters.
    _phantom: std::marker::PhantomData<(A, P, N, T)>,
}

impl<A, P, N, T> SignInReducer<A, P, N, T> {
    /// Create a reducer with default timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&SignInConfig::default())
    }

    /// Create a reducer using the timeouts of `config`.
    #[must_use]
    pub const fn from_config(config: &SignInConfig) -> Self {
        Self {
            auth_timeout: config.auth_timeout,
            success_auto_close: config.success_auto_close,
            error_auto_close: config.error_auto_close,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, P, N, T> Default for SignInReducer<A, P, N, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, P, N, T> SignInReducer<A, P, N, T>
where
    A: Authenticator + Clone + 'static,
    P: SessionPersister + Clone + 'static,
    N: Navigator + Clone + 'static,
    T: Notifier + Clone + 'static,
{
    fn authenticate(
        &self,
        state: &SignInState,
        env: &SignInEnvironment<A, P, N, T>,
    ) -> Effect<SignInAction> {
        let authenticator = env.authenticator.clone();
        let credentials = state.credentials();
        let timeout = self.auth_timeout;

        Effect::Future(Box::pin(async move {
            let outcome = match tokio::time::timeout(timeout, authenticator.authenticate(&credentials)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::warn!(?timeout, "Authenticator did not answer in time");
                    Err(AuthFailure::with_message(TIMEOUT_MESSAGE))
                },
            };
            Some(SignInAction::AuthResponse(outcome))
        }))
    }

    fn on_success(
        &self,
        auth: Authenticated,
        env: &SignInEnvironment<A, P, N, T>,
    ) -> Effect<SignInAction> {
        let sessions = env.sessions.clone();
        let notifier = env.notifier.clone();
        let navigator = env.navigator.clone();
        let notification = Notification::success(SUCCESS_MESSAGE).with_auto_close(self.success_auto_close);

        Effect::chain(vec![
            Effect::fire_and_forget(async move {
                // Phase stays Succeeded when persistence fails
                if let Err(error) = sessions.persist(&auth.session, &auth.user).await {
                    tracing::error!(%error, "Failed to persist session");
                }
            }),
            Effect::fire_and_forget(async move { notifier.notify(notification) }),
            Effect::fire_and_forget(async move { navigator.navigate(Route::Home) }),
        ])
    }

    fn on_failure(
        &self,
        failure: &AuthFailure,
        env: &SignInEnvironment<A, P, N, T>,
    ) -> Effect<SignInAction> {
        let notifier = env.notifier.clone();
        let notification =
            Notification::error(failure.message_or_default()).with_auto_close(self.error_auto_close);

        Effect::fire_and_forget(async move { notifier.notify(notification) })
    }
}

impl<A, P, N, T> Reducer for SignInReducer<A, P, N, T>
where
    A: Authenticator + Clone + 'static,
    P: SessionPersister + Clone + 'static,
    N: Navigator + Clone + 'static,
    T: Notifier + Clone + 'static,
{
    type State = SignInState;
    type Action = SignInAction;
    type Environment = SignInEnvironment<A, P, N, T>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // FieldChanged: edit a field, clear a shown outcome
            // ═══════════════════════════════════════════════════════════════
            SignInAction::FieldChanged { field, value } => {
                state.set_field(field, value);
                if state.phase.is_outcome() {
                    state.phase = Phase::Idle;
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Submit: start an attempt unless one is in flight
            // ═══════════════════════════════════════════════════════════════
            SignInAction::Submit => {
                if state.phase == Phase::Submitting {
                    tracing::debug!("Submit ignored: attempt already in flight");
                    return smallvec![Effect::None];
                }

                state.phase = Phase::Submitting;
                metrics::counter!("signin.attempts").increment(1);
                tracing::info!(email = %state.email, "Sign-in attempt started");

                smallvec![self.authenticate(state, env)]
            },

            // ═══════════════════════════════════════════════════════════════
            // AuthResponse: resolve the in-flight attempt
            // ═══════════════════════════════════════════════════════════════
            SignInAction::AuthResponse(outcome) => {
                if state.phase != Phase::Submitting {
                    tracing::warn!(phase = ?state.phase, "Ignoring stale authenticator response");
                    return smallvec![Effect::None];
                }

                match outcome {
                    Ok(auth) => {
                        state.phase = Phase::Succeeded;
                        metrics::counter!("signin.outcome", "result" => "success").increment(1);
                        tracing::info!(email = %state.email, "Sign-in succeeded");
                        smallvec![self.on_success(auth, env)]
                    },
                    Err(failure) => {
                        state.phase = Phase::Failed;
                        metrics::counter!("signin.outcome", "result" => "failure").increment(1);
                        tracing::info!(email = %state.email, reason = %failure, "Sign-in failed");
                        smallvec![self.on_failure(&failure, env)]
                    },
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockAuthenticator, MockNotifier, MockSessionStore};
    use crate::providers::HistoryNavigator;
    use crate::state::{Field, NotificationKind, SessionToken, UserProfile};
    use proptest::prelude::*;
    use storefront_testing::{assertions, ReducerTest};

    type TestEnv = SignInEnvironment<MockAuthenticator, MockSessionStore, HistoryNavigator, MockNotifier>;
    type TestReducer = SignInReducer<MockAuthenticator, MockSessionStore, HistoryNavigator, MockNotifier>;

    fn test_env() -> TestEnv {
        SignInEnvironment::new(
            MockAuthenticator::succeeding("tok", serde_json::json!({ "id": 1 })),
            MockSessionStore::new(),
            HistoryNavigator::new(),
            MockNotifier::new(),
        )
    }

    fn state_in(phase: Phase) -> SignInState {
        SignInState {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
            phase,
        }
    }

    fn authenticated() -> Authenticated {
        Authenticated {
            session: SessionToken::new("tok"),
            user: UserProfile::new(serde_json::json!({ "id": 1 })),
        }
    }

    #[test]
    fn test_field_change_sets_value() {
        let env = test_env();
        let _ = ReducerTest::new(&TestReducer::new(), &env)
            .reduce(SignInState::default(), SignInAction::email("x"))
            .then_state(|state| {
                assert_eq!(state.email, "x");
                assert_eq!(state.phase, Phase::Idle);
            })
            .then_effects(assertions::assert_no_effects);
    }

    #[test]
    fn test_field_change_after_failure_resets_phase() {
        let env = test_env();
        let _ = ReducerTest::new(&TestReducer::new(), &env)
            .reduce(state_in(Phase::Failed), SignInAction::password("correct horse"))
            .then_state(|state| {
                assert_eq!(state.password, "correct horse");
                assert_eq!(state.phase, Phase::Idle);
            });
    }

    #[tokio::test]
    async fn test_submit_authenticates_entered_credentials() {
        let env = test_env();
        let actions = ReducerTest::new(&TestReducer::new(), &env)
            .reduce(state_in(Phase::Idle), SignInAction::Submit)
            .then_state(|state| assert_eq!(state.phase, Phase::Submitting))
            .then_effects(|effects| assertions::assert_steps(effects, 1))
            .run_effects()
            .await;

        assert_eq!(actions, vec![SignInAction::AuthResponse(Ok(authenticated()))]);
        let calls = env.authenticator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].email, "user@example.com");
        assert_eq!(calls[0].password, "hunter2");
    }

    #[test]
    fn test_submit_from_failed_starts_new_attempt() {
        let env = test_env();
        let _ = ReducerTest::new(&TestReducer::new(), &env)
            .reduce(state_in(Phase::Failed), SignInAction::Submit)
            .then_state(|state| assert_eq!(state.phase, Phase::Submitting))
            .then_effects(|effects| assertions::assert_steps(effects, 1));
    }

    #[test]
    fn test_submit_while_submitting_is_ignored() {
        let env = test_env();
        let _ = ReducerTest::new(&TestReducer::new(), &env)
            .reduce(state_in(Phase::Submitting), SignInAction::Submit)
            .then_state(|state| assert_eq!(*state, state_in(Phase::Submitting)))
            .then_effects(assertions::assert_no_effects);
    }

    #[tokio::test]
    async fn test_success_steps_run_in_order() {
        let env = test_env();
        let mut steps = ReducerTest::new(&TestReducer::new(), &env)
            .reduce(state_in(Phase::Submitting), SignInAction::AuthResponse(Ok(authenticated())))
            .then_state(|state| assert_eq!(state.phase, Phase::Succeeded))
            .then_effects(|effects| assertions::assert_steps(effects, 3))
            .into_steps();

        assert_eq!(steps.run_next().await, None);
        assert_eq!(env.sessions.persisted().len(), 1);
        assert!(env.notifier.notifications().is_empty());

        assert_eq!(steps.run_next().await, None);
        let sent = env.notifier.of_kind(NotificationKind::Success);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "Successfully signed in");
        assert_eq!(sent[0].auto_close, Duration::from_millis(5000));
        assert!(env.navigator.history().is_empty());

        assert_eq!(steps.run_next().await, None);
        assert_eq!(env.navigator.history(), vec![Route::Home]);
        assert!(steps.is_done());
    }

    #[tokio::test]
    async fn test_failure_notifies_with_message() {
        let env = test_env();
        let actions = ReducerTest::new(&TestReducer::new(), &env)
            .reduce(
                state_in(Phase::Submitting),
                SignInAction::AuthResponse(Err(AuthFailure::with_message("Invalid credentials"))),
            )
            .then_state(|state| assert_eq!(state.phase, Phase::Failed))
            .then_effects(|effects| assertions::assert_steps(effects, 1))
            .run_effects()
            .await;

        assert!(actions.is_empty());
        let sent = env.notifier.of_kind(NotificationKind::Error);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "Invalid credentials");
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let env = test_env();
        let _ = ReducerTest::new(&TestReducer::new(), &env)
            .reduce(state_in(Phase::Idle), SignInAction::AuthResponse(Ok(authenticated())))
            .then_state(|state| assert_eq!(state.phase, Phase::Idle))
            .then_effects(assertions::assert_no_effects);
    }

    #[tokio::test]
    async fn test_failure_effect_uses_default_message() {
        let env = test_env();
        let _ = ReducerTest::new(&TestReducer::new(), &env)
            .reduce(
                state_in(Phase::Submitting),
                SignInAction::AuthResponse(Err(AuthFailure::new(None))),
            )
            .run_effects()
            .await;

        let sent = env.notifier.of_kind(NotificationKind::Error);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "Something went wrong");
        assert_eq!(sent[0].auto_close, Duration::from_millis(2000));
        assert!(env.sessions.persisted().is_empty());
        assert!(env.navigator.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_authenticator_timeout_fails_attempt() {
        let mut env = test_env();
        env.authenticator = MockAuthenticator::failing(None).with_delay(Duration::from_secs(60));
        let reducer = TestReducer::from_config(
            &SignInConfig::default().with_auth_timeout(Duration::from_secs(1)),
        );

        let actions = ReducerTest::new(&reducer, &env)
            .reduce(state_in(Phase::Idle), SignInAction::Submit)
            .run_effects()
            .await;

        assert_eq!(
            actions,
            vec![SignInAction::AuthResponse(Err(AuthFailure::with_message("Request timed out")))]
        );
    }

    fn phase_strategy() -> impl Strategy<Value = Phase> {
        prop_oneof![
            Just(Phase::Idle),
            Just(Phase::Submitting),
            Just(Phase::Failed),
            Just(Phase::Succeeded),
        ]
    }

    fn field_strategy() -> impl Strategy<Value = Field> {
        prop_oneof![Just(Field::Email), Just(Field::Password)]
    }

    proptest! {
        #[test]
        fn prop_field_edits_only_reset_outcomes(
            phase in phase_strategy(),
            edits in prop::collection::vec((field_strategy(), ".{0,16}"), 1..8),
        ) {
            let env = test_env();
            let reducer = TestReducer::new();
            let mut state = state_in(phase);
            let expected = if phase.is_outcome() { Phase::Idle } else { phase };

            for (field, value) in edits {
                let effects = reducer.reduce(
                    &mut state,
                    SignInAction::FieldChanged { field, value: value.clone() },
                    &env,
                );
                prop_assert!(effects.iter().all(Effect::is_noop));
                prop_assert_eq!(state.phase, expected);
                match field {
                    Field::Email => prop_assert_eq!(&state.email, &value),
                    Field::Password => prop_assert_eq!(&state.password, &value),
                }
            }
            prop_assert_eq!(env.authenticator.call_count(), 0);
        }

        #[test]
        fn prop_repeated_edit_is_idempotent(value in ".{0,16}") {
            let env = test_env();
            let reducer = TestReducer::new();
            let mut state = state_in(Phase::Failed);

            let _ = reducer.reduce(&mut state, SignInAction::email(value.clone()), &env);
            let once = state.clone();
            let _ = reducer.reduce(&mut state, SignInAction::email(value), &env);

            prop_assert_eq!(state, once);
        }
    }
}
