//! Tracing setup shared by the `subsync` and `subsync-hook` binaries.
//!
//! Diagnostics only: output goes to stderr and is controlled by `RUST_LOG`.
//! Synchronisation outcomes are also returned to callers as [`crate::sync::SyncOutcome`],
//! so nothing depends on log output.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`; falls back to `default_filter` when unset or invalid.
///
/// # Example
/// ```bash
/// RUST_LOG=subsync=debug subsync-hook --port 8000
/// ```
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
