//! Staged bring-up, main loop, and guaranteed teardown.
//!
//! This module provides:
//! - Launcher, the orchestrator of one run
//! - RunReport describing what happened
//!
//! A run goes through these steps:
//!
//! 1. Acquire the stages in order. Stop at the first failure.
//! 2. If every stage succeeded, run the main loop once.
//! 3. Fire the guards of the acquired stages, last acquired first.
//! 4. Classify the result. Notify the user if enabled.
//! 5. Map the result to an exit code.
//!
//! Step 3 also happens if the loop panics, because the guard stack releases
//! on drop while unwinding.

mod report;
mod tracker;


pub use report::RunReport;

use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::classify::classify;
use crate::config::LaunchConfig;
use crate::core::{LifecycleEvent, LifecycleState, LoopOutcome, RunResult};
use crate::events::{EventObserver, LoggingNotificationSink, LoggingObserver, NotificationSink};
use crate::exit::ExitCodeMapper;
use crate::runner::run_loop;
use crate::stages::{StageSequence, StagingOutcome};
use tracker::StateTracker;

/// Orchestrates one staged run.
#[derive(Clone)]
pub struct Launcher {
    notifier: Arc<dyn NotificationSink>,
    observer: Arc<dyn EventObserver>,
    notify_on_error: bool,
    exit_codes: ExitCodeMapper,
}

impl Default for Launcher {
    fn default() -> Self {
        Self {
            notifier: Arc::new(LoggingNotificationSink),
            observer: Arc::new(LoggingObserver::default()),
            notify_on_error: true,
            exit_codes: ExitCodeMapper::new(),
        }
    }
}

impl Launcher {
    /// Creates a launcher that logs notifications and events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a launcher from configuration.
    #[must_use]
    pub fn from_config(config: &LaunchConfig) -> Self {
        Self::new()
            .with_notify_on_error(config.notify_on_error)
            .with_exit_codes(config.exit_codes())
    }

    /// Sets the notification sink.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Sets the event observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn EventObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Enables or disables the user-facing notification.
    ///
    /// Classification and exit codes are unaffected.
    #[must_use]
    pub fn with_notify_on_error(mut self, enabled: bool) -> Self {
        self.notify_on_error = enabled;
        self
    }

    /// Sets the exit code mapping.
    #[must_use]
    pub fn with_exit_codes(mut self, exit_codes: ExitCodeMapper) -> Self {
        self.exit_codes = exit_codes;
        self
    }

    /// Runs `stages`, then `main_loop` if they all succeeded, then tears down.
    ///
    /// Never fails: stage and loop failures are folded into the report.
    pub fn run<L>(&self, stages: StageSequence, main_loop: Option<L>) -> RunReport
    where
        L: FnOnce() -> Option<String>,
    {
        let run_id = Uuid::new_v4();
        let span = info_span!("launch", run_id = %run_id);
        let _enter = span.enter();

        let started_at = Utc::now();
        let mut states = StateTracker::new();
        info!(stages = stages.len(), "launch starting");

        states.advance(LifecycleState::Staging);
        let StagingOutcome { failure, mut guards } = stages.run(self.observer.as_ref());

        let result = match failure {
            Some(kind) => {
                states.advance(LifecycleState::StagingFailed);
                RunResult::staging_failed(kind)
            }
            None => {
                states.advance(LifecycleState::Running);
                self.observer.observe(&LifecycleEvent::loop_started());
                let outcome = LoopOutcome::from_message(run_loop(main_loop));
                self.observer
                    .observe(&LifecycleEvent::loop_finished(outcome.failure_message()));
                states.advance(if outcome.is_failure() {
                    LifecycleState::RunningFailed
                } else {
                    LifecycleState::Completed
                });
                RunResult::from_loop(outcome)
            }
        };

        let teardown = guards.teardown();
        for label in &teardown.released {
            self.observer.observe(&LifecycleEvent::guard_released(label));
        }
        for failure in &teardown.failures {
            self.observer
                .observe(&LifecycleEvent::guard_failed(&failure.label, &failure.message));
        }
        states.advance(LifecycleState::TornDown);

        let notification = classify(&result);
        let notified = match &notification {
            Some(notice) if self.notify_on_error => {
                self.notifier.notify(&notice.title, &notice.body);
                self.observer
                    .observe(&LifecycleEvent::notification_sent(&notice.title));
                true
            }
            Some(notice) => {
                info!(title = %notice.title, "notification suppressed");
                false
            }
            None => false,
        };

        let exit_code = self.exit_codes.exit_code(&result);
        info!(
            exit_code,
            released = teardown.released.len(),
            teardown_failures = teardown.failures.len(),
            "launch finished"
        );

        RunReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            result,
            exit_code,
            notification,
            notified,
            teardown,
            states: states.into_history(),
        }
    }
}

impl fmt::Debug for Launcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Launcher")
            .field("notify_on_error", &self.notify_on_error)
            .field("exit_codes", &self.exit_codes)
            .finish_non_exhaustive()
    }
}
