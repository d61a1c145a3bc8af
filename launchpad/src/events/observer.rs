//! Lifecycle event observers.

use parking_lot::RwLock;
use tracing::Level;

use crate::core::LifecycleEvent;

/// Receives lifecycle events from the orchestrator.
///
/// Observers must not fail; anything they cannot handle is dropped.
pub trait EventObserver {
    /// Handles one event.
    fn observe(&self, event: &LifecycleEvent);
}

/// An observer that discards all events.
///
/// Used as the default when no observer is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl EventObserver for NoOpObserver {
    fn observe(&self, _event: &LifecycleEvent) {}
}

/// An observer that logs events using the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    level: Level,
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self { level: Level::DEBUG }
    }
}

impl LoggingObserver {
    /// Creates a logging observer at the given level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates an info-level logging observer.
    #[must_use]
    pub fn info() -> Self {
        Self::new(Level::INFO)
    }

    /// The level events are logged at.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }
}

impl EventObserver for LoggingObserver {
    fn observe(&self, event: &LifecycleEvent) {
        macro_rules! log_event {
            ($level:expr) => {
                tracing::event!(
                    $level,
                    event_type = %event.event_type,
                    event_data = ?event.data,
                    "Event: {}", event.event_type
                )
            };
        }

        // Callsite levels must be constants.
        match self.level {
            Level::ERROR => log_event!(Level::ERROR),
            Level::WARN => log_event!(Level::WARN),
            Level::INFO => log_event!(Level::INFO),
            Level::DEBUG => log_event!(Level::DEBUG),
            _ => log_event!(Level::TRACE),
        }
    }
}

/// A collecting observer for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: RwLock<Vec<LifecycleEvent>>,
}

impl CollectingObserver {
    /// Creates a new collecting observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.read().clone()
    }

    /// Returns the collected event types, in order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events.read().iter().map(|e| e.event_type.clone()).collect()
    }

    /// Returns events matching a type prefix.
    #[must_use]
    pub fn events_of_type(&self, type_prefix: &str) -> Vec<LifecycleEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_type.starts_with(type_prefix))
            .cloned()
            .collect()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

impl EventObserver for CollectingObserver {
    fn observe(&self, event: &LifecycleEvent) {
        self.events.write().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;

    #[test]
    fn test_noop_observer() {
        NoOpObserver.observe(&LifecycleEvent::loop_started());
    }

    #[test]
    fn test_logging_observer() {
        LoggingObserver::default().observe(&LifecycleEvent::guard_released("x"));
        LoggingObserver::info().observe(&LifecycleEvent::loop_finished(Some("boom")));
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged_at(level: Level) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            LoggingObserver::new(level).observe(&LifecycleEvent::loop_started());
        });
        let bytes = capture.0.lock().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_logging_observer_uses_configured_level() {
        for level in [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE] {
            let line = logged_at(level);
            assert!(
                line.trim_start().starts_with(level.as_str()),
                "expected {level} line, got {line:?}"
            );
            assert!(line.contains("Event: loop.started"));
        }
    }

    #[test]
    fn test_collecting_observer_filter() {
        let observer = CollectingObserver::new();
        assert!(observer.is_empty());

        observer.observe(&LifecycleEvent::stage_acquired("transport", 0));
        observer.observe(&LifecycleEvent::stage_acquired("windows", 1));
        observer.observe(&LifecycleEvent::guard_released("windows"));

        assert_eq!(observer.len(), 3);
        assert_eq!(observer.events_of_type("stage.").len(), 2);
        assert_eq!(
            observer.event_types(),
            vec!["stage.acquired", "stage.acquired", "guard.released"]
        );
    }
}
