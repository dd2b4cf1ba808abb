//! Transient user notifications (toasts).
//!
//! The client decides what to say; a `Notifier` decides how to show it.

pub mod messages;

use std::time::Duration;

use tokio::sync::mpsc;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Error,
    Warning,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub duration: Duration,
}

/// Shows notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Emits notifications as log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let duration_ms = notification.duration.as_millis() as u64;
        match notification.level {
            NotificationLevel::Error => {
                tracing::error!(duration_ms, message = %notification.message, "Notification")
            }
            NotificationLevel::Warning => {
                tracing::warn!(duration_ms, message = %notification.message, "Notification")
            }
        }
    }
}

/// Prints notifications to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let prefix = match notification.level {
            NotificationLevel::Error => "error",
            NotificationLevel::Warning => "warning",
        };
        eprintln!("{}: {}", prefix, notification.message);
    }
}

/// Forwards notifications to a channel, for UIs that render them.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::debug!("Notification receiver dropped");
        }
    }
}
