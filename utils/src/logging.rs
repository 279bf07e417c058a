//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with an explicit fallback level and output format.
///
/// `RUST_LOG` still wins when set; `level` applies otherwise. With `json`
/// set, events are emitted as one JSON object per line.
pub fn init_tracing_with(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
