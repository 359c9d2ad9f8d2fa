//! Shared application state for the webhook server.

use std::sync::Arc;

use subsync::core::target_map::TargetStatusMap;
use subsync::io::tracker::IssueTracker;

/// Shared state accessible from all request handlers.
///
/// Holds the process-wide tracker client; every in-flight event uses the same
/// handle. Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Tracker client opened at startup and dropped at shutdown.
    pub tracker: Arc<dyn IssueTracker>,
    /// Managed status table built from configuration.
    pub statuses: Arc<TargetStatusMap>,
}

impl AppState {
    pub fn new(tracker: Arc<dyn IssueTracker>, statuses: TargetStatusMap) -> Self {
        Self {
            tracker,
            statuses: Arc::new(statuses),
        }
    }
}
