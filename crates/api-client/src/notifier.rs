//! A [`Notifier`] that writes notifications to the tracing pipeline.

use domain::{Notification, NotificationLevel, Notifier};
use tracing::{info, warn};

/// Emits each notification as a structured `tracing` event.
///
/// The default for headless callers: failures end up in the same log stream
/// as the request that caused them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let raised_at = notification.raised_at;
        match notification.level {
            NotificationLevel::Error => {
                warn!(%raised_at, message = %notification.message, "notification")
            }
            NotificationLevel::Success | NotificationLevel::Info => {
                info!(%raised_at, message = %notification.message, "notification")
            }
        }
    }
}
