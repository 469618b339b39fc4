//! Tracing/logging initialization.
//!
//! The store layer is the only emitter today; default to `info` there and
//! let `RUST_LOG` override per module.

use tracing_subscriber::EnvFilter;

/// Install the process-wide subscriber.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // JSON lines with timestamps; quiet about targets.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
