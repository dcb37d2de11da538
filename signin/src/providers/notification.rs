//! Notification capability.

use crate::state::{Notification, NotificationKind};

/// Transient user-facing messages.
///
/// Fire-and-forget: the flow never waits for a notification to close.
pub trait Notifier: Send + Sync {
    /// Show `notification`.
    fn notify(&self, notification: Notification);
}

/// Notifier that reports notifications as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let auto_close_ms = u64::try_from(notification.auto_close.as_millis()).unwrap_or(u64::MAX);
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!(auto_close_ms, "{}", notification.message);
            },
            NotificationKind::Error => {
                tracing::warn!(auto_close_ms, "{}", notification.message);
            },
        }
    }
}
