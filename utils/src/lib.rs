//! Shared utilities for the votelink workspace.

pub mod logging;
pub mod time;

pub use logging::init_tracing_with;
pub use time::format_duration;
