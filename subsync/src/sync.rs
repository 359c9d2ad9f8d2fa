//! Parent status synchronisation pipeline.
//!
//! Coordinates core logic with tracker I/O:
//!
//! ```text
//! event → parent locator → GET parent → exclude deleted subtask
//!       → aggregate → guard → GET transitions → POST transition
//! ```
//!
//! Every remote call depends on the previous result, so calls run strictly in
//! sequence. Tracker failures abort the event and are returned to the caller;
//! all other outcomes are absorbed and reported as [`SyncOutcome`].

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::core::aggregator::aggregate;
use crate::core::categories::{PendingExclusions, StatusCategorySet};
use crate::core::decision::{Decision, SkipReason, decide, select_transition};
use crate::core::target_map::TargetStatusMap;
use crate::core::types::Issue;
use crate::event::WebhookEvent;
use crate::io::tracker::{IssueTracker, TrackerError};

/// What handling one event did. Every variant counts as success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The event issue has no parent; nothing to synchronise.
    NotASubtask,
    /// The parent stays where it is.
    NotNeeded {
        issue: String,
        current: String,
        target: String,
        reason: SkipReason,
    },
    /// The workflow has no direct edge from the current status to the target.
    TransitionNotFound {
        issue: String,
        from: String,
        to: String,
    },
    /// The parent was moved.
    Transitioned {
        issue: String,
        from: String,
        to: String,
        transition_id: String,
    },
}

/// Handle one webhook event end to end.
#[instrument(skip_all, fields(kind = ?event.kind, issue = %event.issue.key))]
pub async fn handle_event(
    tracker: &dyn IssueTracker,
    map: &TargetStatusMap,
    event: &WebhookEvent,
) -> Result<SyncOutcome, TrackerError> {
    let Some(parent) = event.parent_locator() else {
        info!("not a subtask issue type, check webhook configuration");
        return Ok(SyncOutcome::NotASubtask);
    };
    reconcile_parent(tracker, map, parent, &event.exclusions()).await
}

/// Fetch the parent at `locator`, compute its target status, and move it if needed.
#[instrument(skip(tracker, map, exclusions))]
pub async fn reconcile_parent(
    tracker: &dyn IssueTracker,
    map: &TargetStatusMap,
    locator: &str,
    exclusions: &PendingExclusions,
) -> Result<SyncOutcome, TrackerError> {
    let issue = tracker.get_issue(locator).await?;
    let categories = StatusCategorySet::from_subtasks(&issue.subtasks, exclusions);
    let target = aggregate(map, &categories);
    debug!(
        parent = %issue.key,
        categories = ?categories.labels(),
        to = target,
        "aggregated subtask categories"
    );
    decide_and_transition(tracker, map, &issue, target).await
}

/// Move `issue` to `target` when the guard allows it and a direct edge exists.
pub async fn decide_and_transition(
    tracker: &dyn IssueTracker,
    map: &TargetStatusMap,
    issue: &Issue,
    target: &str,
) -> Result<SyncOutcome, TrackerError> {
    if let Decision::Skip(reason) = decide(map, &issue.status, target) {
        info!(
            parent = %issue.key,
            current = %issue.status,
            to = target,
            ?reason,
            "transition is not needed"
        );
        return Ok(SyncOutcome::NotNeeded {
            issue: issue.key.clone(),
            current: issue.status.clone(),
            target: target.to_string(),
            reason,
        });
    }

    let transitions = tracker.list_transitions(&issue.locator).await?;
    let Some(transition) = select_transition(&transitions, target) else {
        warn!(
            parent = %issue.key,
            from = %issue.status,
            to = target,
            "transition from {:?} to {:?} not found",
            issue.status,
            target
        );
        return Ok(SyncOutcome::TransitionNotFound {
            issue: issue.key.clone(),
            from: issue.status.clone(),
            to: target.to_string(),
        });
    };

    tracker
        .perform_transition(&issue.locator, &transition.id)
        .await?;
    info!(
        parent = %issue.key,
        from = %issue.status,
        to = target,
        transition_id = %transition.id,
        "parent transitioned"
    );
    Ok(SyncOutcome::Transitioned {
        issue: issue.key.clone(),
        from: issue.status.clone(),
        to: target.to_string(),
        transition_id: transition.id.clone(),
    })
}
