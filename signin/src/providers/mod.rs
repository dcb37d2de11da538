//! Sign-in capabilities.
//!
//! The reducer depends only on the traits in this module; hosts inject
//! concrete implementations through
//! [`SignInEnvironment`](crate::environment::SignInEnvironment).
//!
//! | Capability | Trait | Production implementation |
//! |------------|-------|---------------------------|
//! | Authenticate credentials | [`Authenticator`] | [`HttpAuthenticator`] |
//! | Persist the session | [`SessionPersister`] | [`FileSessionStore`] |
//! | Already-authenticated check | [`AuthStatus`] | [`FileSessionStore`] |
//! | Navigate | [`Navigator`] | [`HistoryNavigator`] |
//! | Notify the user | [`Notifier`] | [`TracingNotifier`] |

pub mod authenticator;
pub mod file_session;
pub mod http;
pub mod navigation;
pub mod notification;
pub mod session;

pub use authenticator::{AuthStatus, Authenticator};
pub use file_session::FileSessionStore;
pub use http::HttpAuthenticator;
pub use navigation::{HistoryNavigator, Navigator};
pub use notification::{Notifier, TracingNotifier};
pub use session::SessionPersister;
