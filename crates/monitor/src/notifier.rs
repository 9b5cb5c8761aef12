//! Notification sinks for the monitor daemon.
//!
//! [`TracingSink`] writes alerts to the log. [`NotificationHub`] fans them
//! out over a `tokio::sync::broadcast` channel to any number of listeners
//! (a dashboard push socket, a test harness).

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use hydrogrow_core::monitoring::sink::NotificationSink;
use hydrogrow_core::monitoring::Severity;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// A rendered notification, as delivered to listeners.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub sent_at: DateTime<Utc>,
}

/// Logs every notification at `warn` (or `error` for critical).
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, title: &str, description: &str, severity: Severity) {
        match severity {
            Severity::Critical => {
                tracing::error!(title, description, severity = %severity, "Alert raised")
            }
            Severity::Warning => {
                tracing::warn!(title, description, severity = %severity, "Alert raised")
            }
        }
    }
}

/// In-process fan-out of notifications.
///
/// When the buffer is full, the oldest unconsumed notifications are dropped
/// and slow receivers observe `RecvError::Lagged`.
pub struct NotificationHub {
    sender: broadcast::Sender<Notification>,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl NotificationSink for NotificationHub {
    fn notify(&self, title: &str, description: &str, severity: Severity) {
        let notification = Notification {
            title: title.to_string(),
            description: description.to_string(),
            severity,
            sent_at: Utc::now(),
        };
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(notification);
    }
}

/// Delivers to several sinks in order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl NotificationSink for FanoutSink {
    fn notify(&self, title: &str, description: &str, severity: Severity) {
        for sink in &self.sinks {
            sink.notify(title, description, severity);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
