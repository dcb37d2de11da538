//! Navigation capability.

use crate::state::Route;
use std::sync::{Arc, Mutex, PoisonError};

/// Route changes requested by the flow.
pub trait Navigator: Send + Sync {
    /// Navigate to `route`.
    fn navigate(&self, route: Route);
}

/// Navigator that keeps an in-memory history of visited routes.
///
/// Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct HistoryNavigator {
    history: Arc<Mutex<Vec<Route>>>,
}

impl HistoryNavigator {
    /// Create a navigator with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route navigated to, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent route, if any.
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(path = route.path(), "Navigating");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_shared_between_clones() {
        let navigator = HistoryNavigator::new();
        let clone = navigator.clone();

        clone.navigate(Route::SignUp);
        navigator.navigate(Route::Home);

        assert_eq!(navigator.history(), vec![Route::SignUp, Route::Home]);
        assert_eq!(clone.current(), Some(Route::Home));
    }
}
