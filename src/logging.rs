//! Tracing subscriber setup. `RUST_LOG` overrides the default `info` filter.

use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Human-readable output for the local server
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .try_init();
}

/// One JSON object per event, for the function runtime's log stream
pub fn init_json() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .json()
        .with_current_span(false)
        .without_time()
        .try_init();
}
