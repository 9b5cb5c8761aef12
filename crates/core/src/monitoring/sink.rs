//! Boundary to whatever renders notifications (toasts, logs, push).

use std::sync::Arc;

use crate::monitoring::alert::{AlertEvent, Severity};

/// Fire-and-forget notification target.
///
/// Delivery failures stay inside the sink; the evaluator never hears about them.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, title: &str, description: &str, severity: Severity);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn notify(&self, title: &str, description: &str, severity: Severity) {
        (**self).notify(title, description, severity);
    }
}

/// Hand every event to `sink` in order.
pub fn deliver<N: NotificationSink + ?Sized>(events: &[AlertEvent], sink: &N) {
    for event in events {
        sink.notify(event.title(), &event.message, event.severity);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
