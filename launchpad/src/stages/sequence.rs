//! Ordered stage execution with rollback on the first failure.

use std::fmt;
use tracing::{debug, info, warn};

use super::stage::Stage;
use crate::cleanup::GuardStack;
use crate::core::LifecycleEvent;
use crate::errors::FailureKind;
use crate::events::{EventObserver, NoOpObserver};

/// Result of running a [`StageSequence`].
#[derive(Debug)]
pub struct StagingOutcome {
    /// The failing stage's kind, if any stage failed.
    pub failure: Option<FailureKind>,
    /// Guards of the stages that succeeded, in acquisition order.
    pub guards: GuardStack,
}

impl StagingOutcome {
    /// Returns true if every stage succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// An ordered list of acquisition stages.
#[derive(Default)]
pub struct StageSequence {
    stages: Vec<Stage>,
}

impl StageSequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage.
    #[must_use]
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Appends a stage in place.
    pub fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if there are no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in declared order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Acquires the stages in order.
    ///
    /// Stops at the first failure: later stages are never attempted and the
    /// failing stage registers no guard. The returned guards belong to the
    /// stages that succeeded; the caller decides when to tear them down.
    pub fn run(self, observer: &dyn EventObserver) -> StagingOutcome {
        let mut guards = GuardStack::new();

        for (ordinal, stage) in self.stages.into_iter().enumerate() {
            let name = stage.name().to_string();
            debug!(stage = %name, ordinal, "acquiring stage");

            match stage.acquire() {
                Ok(guard) => {
                    info!(stage = %name, ordinal, "stage acquired");
                    observer.observe(&LifecycleEvent::stage_acquired(&name, ordinal));
                    guards.push(guard);
                }
                Err((kind, err)) => {
                    warn!(stage = %name, ordinal, kind = kind.as_str(), detail = %err, "stage failed");
                    observer.observe(&LifecycleEvent::stage_failed(
                        &name,
                        ordinal,
                        kind.as_str(),
                        &err.detail,
                    ));
                    return StagingOutcome {
                        failure: Some(kind),
                        guards,
                    };
                }
            }
        }

        StagingOutcome {
            failure: None,
            guards,
        }
    }
}

impl From<Vec<Stage>> for StageSequence {
    fn from(stages: Vec<Stage>) -> Self {
        Self { stages }
    }
}

impl fmt::Debug for StageSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageSequence")
            .field("stages", &self.names())
            .finish()
    }
}

/// Runs `stages` in order without an observer.
pub fn run_stages(stages: Vec<Stage>) -> StagingOutcome {
    StageSequence::from(stages).run(&NoOpObserver)
}
