//! Acquisition stages and ordered stage execution.
//!
//! Stages are the fundamental units of bring-up: each acquires one native
//! resource and hands back a guard that releases it.

mod sequence;
mod stage;

pub use sequence::{run_stages, StageSequence, StagingOutcome};
pub use stage::{AcquireAction, Stage};
