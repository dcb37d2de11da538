//! # Storefront Sign-In
//!
//! Sign-in flow for the storefront, built on the reducer architecture.
//!
//! ## Modules
//!
//! - [`state`]: Attempt state, credentials, outcomes, routes, notifications
//! - [`actions`]: Reducer inputs
//! - [`reducer`]: The attempt state machine
//! - [`environment`]: Injected capabilities
//! - [`providers`]: Capability traits and production implementations
//! - [`host`]: [`SignInForm`], the component a UI mounts
//! - [`config`]: [`SignInConfig`]
//!
//! ## Flow
//!
//! ```text
//! mount ──(already signed in)──> navigate home
//!   │
//!   ▼
//! Idle ──submit──> Submitting ──Ok──> Succeeded: persist → notify → navigate
//!                             ──Err─> Failed: notify error
//! ```

pub mod actions;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod host;
pub mod providers;
pub mod reducer;
pub mod state;

/// Mock capabilities for testing.
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use actions::SignInAction;
pub use config::SignInConfig;
pub use environment::SignInEnvironment;
pub use error::{Result, SignInError};
pub use host::{FormView, Mounted, SignInForm, SubmitOutcome};
pub use reducer::SignInReducer;
pub use state::{AuthFailure, AuthOutcome, Field, Phase, Route, SignInState};
