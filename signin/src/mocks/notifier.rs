//! Mock notifier for testing.

use crate::providers::Notifier;
use crate::state::{Notification, NotificationKind};
use std::sync::{Arc, Mutex, PoisonError};

/// Mock notifier that records every notification.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotifier {
    /// Create a mock notifier with no recordings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification shown, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Notifications of one kind.
    #[must_use]
    pub fn of_kind(&self, kind: NotificationKind) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|n| n.kind == kind)
            .collect()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, notification: Notification) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
