//! Navigation requests to the hosting environment.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

/// Moves the user to another entry point.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Logs redirects; for hosts without navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(path = %path, "Navigation requested");
    }
}

/// Forwards requested paths to a channel.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, path: &str) {
        if self.tx.send(path.to_string()).is_err() {
            tracing::debug!(path = %path, "Navigation receiver dropped");
        }
    }
}

/// Navigate to `path` after `delay` on a background task.
///
/// The returned handle may be dropped; the navigation still happens.
pub fn schedule(
    navigator: Arc<dyn Navigator>,
    path: String,
    delay: Duration,
) -> tokio::task::JoinHandle<()> {
    tracing::debug!(path = %path, delay_ms = delay.as_millis() as u64, "Navigation scheduled");
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        navigator.navigate(&path);
    })
}
