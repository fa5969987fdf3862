use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::error::GatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// User-facing outcome of an action. Rendering is up to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Error notification showing the server's message verbatim, or `fallback`
    /// when the backend gave none (including transport failures).
    pub fn failure(err: &GatewayError, fallback: &str) -> Self {
        Self::error(err.server_message().unwrap_or(fallback))
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Fans notifications out to every subscriber.
pub struct BroadcastNotifier {
    events: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(256);
        Self { events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.events.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => warn!(message = %notification.message, "notify"),
            _ => info!(level = ?notification.level, message = %notification.message, "notify"),
        }
        // No subscribers is fine; nobody is looking.
        let _ = self.events.send(notification);
    }
}

/// Yes/no gate in front of destructive actions. The calling flow waits for the answer.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Answers every prompt the same way. Used for `--yes` and in tests.
pub struct FixedAnswer(pub bool);

#[async_trait]
impl Confirm for FixedAnswer {
    async fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

#[cfg(test)]
#[path = "tests/notify_tests.rs"]
mod tests;
