//! Core domain model types for launchpad.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Lifecycle states of a run
//! - Loop outcomes and the terminal run result
//! - Lifecycle events

mod event;
mod outcome;
mod status;

pub use event::LifecycleEvent;
pub use outcome::{LoopOutcome, RunResult};
pub use status::LifecycleState;
