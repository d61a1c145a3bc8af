//! # Launchpad
//!
//! Staged bring-up and guaranteed teardown for desktop applications.
//!
//! Launchpad brings up an ordered set of native subsystems (a network
//! transport, a windowing library, a GPU context), runs a caller-supplied
//! main loop while they are live, and releases them in strict reverse order
//! however the run ends. Failures are routed to a single user-facing
//! notification and to the process exit code.
//!
//! - **Scoped release guards**: exactly-once cleanup on every exit path
//! - **Stage sequences**: stop at the first failure, unwind only what was acquired
//! - **Error classification**: one fixed sentence per failing stage
//! - **Exit code mapping**: a stable code per stage
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use launchpad::prelude::*;
//!
//! let stages = StageSequence::new()
//!     .stage(Stage::new("transport", FailureKind::TransportInitFailed, init_transport)
//!         .with_infallible_release(shutdown_transport))
//!     .stage(Stage::new("window system", FailureKind::WindowSystemInitFailed, init_windows)
//!         .with_infallible_release(shutdown_windows));
//!
//! let report = Launcher::new().run(stages, Some(|| main_loop()));
//! std::process::exit(report.exit_code);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod classify;
pub mod cleanup;
pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod exit;
pub mod launcher;
pub mod observability;
pub mod platform;
pub mod resources;
pub mod runner;
pub mod stages;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::classify::{classify, Notification};
    pub use crate::cleanup::{GuardStack, ScopeGuard, TeardownReport};
    pub use crate::config::{LaunchConfig, LogConfig, LogFormat, WindowConfig};
    pub use crate::core::{LifecycleEvent, LifecycleState, LoopOutcome, RunResult};
    pub use crate::errors::{
        AcquireError, ConfigError, FailureKind, TeardownError, TeardownFailure,
    };
    pub use crate::events::{
        EventObserver, LoggingNotificationSink, LoggingObserver, NoOpNotificationSink,
        NoOpObserver, NotificationSink,
    };
    pub use crate::exit::{stage_exit_code, ExitCodeMapper, EXIT_SUCCESS};
    pub use crate::launcher::{Launcher, RunReport};
    pub use crate::platform::{
        desktop_stages, run_frames, DesktopSession, GraphicsBinding, Transport, WindowHandle,
        WindowSystem,
    };
    pub use crate::resources::{report_resource, EmbeddedResources, ResourceAccessor};
    pub use crate::runner::run_loop;
    pub use crate::stages::{run_stages, Stage, StageSequence, StagingOutcome};
}
