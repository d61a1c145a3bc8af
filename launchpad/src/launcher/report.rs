//! Report of one orchestrated run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::Notification;
use crate::cleanup::TeardownReport;
use crate::core::{LifecycleState, RunResult};

/// Everything observable about a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id of the run.
    pub run_id: Uuid,
    /// When staging began.
    pub started_at: DateTime<Utc>,
    /// When teardown and notification were done.
    pub finished_at: DateTime<Utc>,
    /// Terminal result.
    pub result: RunResult,
    /// Process exit code.
    pub exit_code: i32,
    /// The notification composed for the result, whether or not it was shown.
    pub notification: Option<Notification>,
    /// Whether the notification was handed to the sink.
    pub notified: bool,
    /// Guards fired during teardown.
    pub teardown: TeardownReport,
    /// Lifecycle states visited, in order.
    pub states: Vec<LifecycleState>,
}

impl RunReport {
    /// The last lifecycle state reached.
    #[must_use]
    pub fn final_state(&self) -> LifecycleState {
        self.states.last().copied().unwrap_or_default()
    }

    /// Labels of released guards, in firing order.
    #[must_use]
    pub fn released(&self) -> &[String] {
        &self.teardown.released
    }

    /// Elapsed wall time in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
