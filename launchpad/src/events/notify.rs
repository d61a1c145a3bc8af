//! User-facing notification sinks.

use parking_lot::RwLock;
use tracing::error;

use crate::classify::Notification;

/// Surface for the single user-facing failure notice of a run.
///
/// Fire-and-forget: the orchestrator consumes no result, and an
/// implementation that cannot deliver should log and return.
pub trait NotificationSink {
    /// Shows a notice with the given title and body.
    fn notify(&self, title: &str, body: &str);
}

/// A sink that discards notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotificationSink;

impl NotificationSink for NoOpNotificationSink {
    fn notify(&self, _title: &str, _body: &str) {}
}

/// A sink that writes notifications to the log at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotificationSink;

impl NotificationSink for LoggingNotificationSink {
    fn notify(&self, title: &str, body: &str) {
        error!(title = %title, "{}", body);
    }
}

/// A collecting sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingNotificationSink {
    notifications: RwLock<Vec<Notification>>,
}

impl CollectingNotificationSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected notifications.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().clone()
    }

    /// Returns the number of collected notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.read().len()
    }

    /// Returns true if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.read().is_empty()
    }
}

impl NotificationSink for CollectingNotificationSink {
    fn notify(&self, title: &str, body: &str) {
        self.notifications.write().push(Notification {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

/// A sink that shows a native modal message box.
#[cfg(feature = "native-dialog")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogNotificationSink;

#[cfg(feature = "native-dialog")]
impl NotificationSink for DialogNotificationSink {
    fn notify(&self, title: &str, body: &str) {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(body)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink() {
        NoOpNotificationSink.notify("title", "body");
    }

    #[test]
    fn test_logging_sink() {
        LoggingNotificationSink.notify("Runtime Error", "something broke");
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingNotificationSink::new();
        assert!(sink.is_empty());

        sink.notify("Initialization Error", "could not start");

        assert_eq!(sink.len(), 1);
        let collected = sink.notifications();
        assert_eq!(collected[0].title, "Initialization Error");
        assert_eq!(collected[0].body, "could not start");
    }
}
