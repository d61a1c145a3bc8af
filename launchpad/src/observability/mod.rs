//! Logging setup for launchpad binaries.

mod logging;

pub use logging::{env_filter, init_logging};
