//! Mock capabilities for testing.
//!
//! These mocks record every call so tests can assert on what the flow
//! did. Clones share their recordings.
//!
//! Navigation needs no mock: [`HistoryNavigator`](crate::providers::HistoryNavigator)
//! already records every route in memory.

pub mod authenticator;
pub mod notifier;
pub mod session;

pub use authenticator::MockAuthenticator;
pub use notifier::MockNotifier;
pub use session::MockSessionStore;
