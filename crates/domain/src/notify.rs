//! The notification port.
//!
//! The resource client raises a [`Notification`] for every failed call. What
//! a notification *looks like* (a toast, a log line, a desktop popup) is not
//! the client's concern: it is handed to whatever [`Notifier`] the composition
//! root injected.

use crate::types::Notification;

/// Receives user-facing notifications.
///
/// Implementations must be cheap and must not block: the client calls
/// `notify` inline before returning the envelope to its caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// A [`Notifier`] that drops every notification.
///
/// Useful for batch callers that inspect envelopes themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, notification: Notification) {
        tracing::trace!(
            level = ?notification.level,
            message = %notification.message,
            "notification discarded"
        );
    }
}

impl<F> Notifier for F
where
    F: Fn(Notification) + Send + Sync,
{
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}
