//! Lifecycle event type emitted during a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An event emitted by the orchestrator.
///
/// Events are consumed by [`crate::events::EventObserver`]s for logging
/// or test inspection. They carry no control-flow meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// The event type (e.g., "stage.acquired", "guard.released").
    #[serde(rename = "type")]
    pub event_type: String,

    /// When the event occurred.
    pub timestamp: DateTime<Utc>,

    /// The event payload data.
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl LifecycleEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp: Utc::now(),
            data: HashMap::new(),
        }
    }

    /// Adds a data field to the event.
    #[must_use]
    pub fn add_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Returns a string data field.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(serde_json::Value::as_str)
    }

    /// Creates a "stage.acquired" event.
    #[must_use]
    pub fn stage_acquired(stage: &str, ordinal: usize) -> Self {
        Self::new("stage.acquired")
            .add_data("stage", serde_json::json!(stage))
            .add_data("ordinal", serde_json::json!(ordinal))
    }

    /// Creates a "stage.failed" event.
    #[must_use]
    pub fn stage_failed(stage: &str, ordinal: usize, kind: &str, detail: &str) -> Self {
        Self::new("stage.failed")
            .add_data("stage", serde_json::json!(stage))
            .add_data("ordinal", serde_json::json!(ordinal))
            .add_data("kind", serde_json::json!(kind))
            .add_data("detail", serde_json::json!(detail))
    }

    /// Creates a "loop.started" event.
    #[must_use]
    pub fn loop_started() -> Self {
        Self::new("loop.started")
    }

    /// Creates a "loop.finished" event.
    #[must_use]
    pub fn loop_finished(failure: Option<&str>) -> Self {
        let event = Self::new("loop.finished");
        match failure {
            Some(message) => event.add_data("error", serde_json::json!(message)),
            None => event,
        }
    }

    /// Creates a "guard.released" event.
    #[must_use]
    pub fn guard_released(label: &str) -> Self {
        Self::new("guard.released").add_data("label", serde_json::json!(label))
    }

    /// Creates a "guard.failed" event.
    #[must_use]
    pub fn guard_failed(label: &str, message: &str) -> Self {
        Self::new("guard.failed")
            .add_data("label", serde_json::json!(label))
            .add_data("error", serde_json::json!(message))
    }

    /// Creates a "notification.sent" event.
    #[must_use]
    pub fn notification_sent(title: &str) -> Self {
        Self::new("notification.sent").add_data("title", serde_json::json!(title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = LifecycleEvent::new("custom");
        assert_eq!(event.event_type, "custom");
        assert!(event.data.is_empty());
    }

    #[test]
    fn test_stage_failed_event() {
        let event = LifecycleEvent::stage_failed("window", 2, "window_create_failed", "no display");
        assert_eq!(event.event_type, "stage.failed");
        assert_eq!(event.str_field("stage"), Some("window"));
        assert_eq!(event.str_field("detail"), Some("no display"));
        assert_eq!(event.data.get("ordinal"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn test_loop_finished_event() {
        assert!(LifecycleEvent::loop_finished(None).data.is_empty());
        let failed = LifecycleEvent::loop_finished(Some("disk full"));
        assert_eq!(failed.str_field("error"), Some("disk full"));
    }

    #[test]
    fn test_event_serialize_uses_type_key() {
        let json = serde_json::to_value(LifecycleEvent::guard_released("Cleanup")).unwrap();
        assert_eq!(json["type"], "guard.released");
        assert_eq!(json["data"]["label"], "Cleanup");
    }
}
