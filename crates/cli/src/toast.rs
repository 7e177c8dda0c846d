//! Terminal "toast" notifications.

use domain::{Notification, NotificationLevel, Notifier};

/// Prints each notification as one line on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrToast;

impl Notifier for StderrToast {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", render(&notification));
    }
}

fn render(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Error => "error",
        NotificationLevel::Success => "ok",
        NotificationLevel::Info => "info",
    };
    format!("[{tag}] {}", notification.message)
}
