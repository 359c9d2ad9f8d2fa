//! End-to-end pipeline scenarios driven through `handle_event`.
//!
//! Each test scripts the parent issue and its available transitions, feeds one
//! webhook event, and checks which remote calls were issued.

use serde_json::json;
use subsync::core::target_map::TargetStatusMap;
use subsync::core::types::{StatusCategory, Transition};
use subsync::event::WebhookEvent;
use subsync::io::tracker::TrackerError;
use subsync::sync::{SyncOutcome, handle_event};
use subsync::test_support::{
    Call, ScriptedTracker, done_transitions, in_progress_transitions, issue,
    ready_for_dev_transitions, transition,
};

const PARENT: &str = "http://localhost:8080/rest/api/2/issue/10000";
const EVENT_ISSUE_ID: &str = "10123";

fn event(kind: &str) -> WebhookEvent {
    serde_json::from_value(json!({
        "webhookEvent": kind,
        "issue": {
            "id": EVENT_ISSUE_ID,
            "key": "TPROJ-30",
            "fields": {"parent": {"self": PARENT}}
        }
    }))
    .expect("decode event")
}

fn default_map() -> TargetStatusMap {
    TargetStatusMap::default()
}

fn non_subtask_event() -> WebhookEvent {
    serde_json::from_value(json!({
        "webhookEvent": "jira:issue_updated",
        "issue": {"id": EVENT_ISSUE_ID, "key": "TPROJ-30", "fields": {}}
    }))
    .expect("decode event")
}

struct Case {
    parent_status: &'static str,
    subtasks: &'static [StatusCategory],
    transitions: fn() -> Vec<Transition>,
    expected: &'static str,
}

/// Parent status before the event, subtask categories, workflow, expected new status.
///
/// Rows with no subtasks are delivered as a deletion of the last subtask.
const CASES: &[Case] = &[
    Case {
        parent_status: "To Do",
        subtasks: &[StatusCategory::InProgress],
        transitions: ready_for_dev_transitions,
        expected: "In Progress",
    },
    Case {
        parent_status: "To Do",
        subtasks: &[StatusCategory::Done],
        transitions: ready_for_dev_transitions,
        expected: "Done",
    },
    Case {
        parent_status: "Done",
        subtasks: &[StatusCategory::ToDo],
        transitions: done_transitions,
        expected: "To Do",
    },
    Case {
        parent_status: "Done",
        subtasks: &[StatusCategory::InProgress],
        transitions: done_transitions,
        expected: "In Progress",
    },
    Case {
        parent_status: "In Progress",
        subtasks: &[StatusCategory::ToDo],
        transitions: in_progress_transitions,
        expected: "To Do",
    },
    Case {
        parent_status: "In Progress",
        subtasks: &[StatusCategory::Done],
        transitions: in_progress_transitions,
        expected: "Done",
    },
    Case {
        parent_status: "In Progress",
        subtasks: &[StatusCategory::Done, StatusCategory::Done],
        transitions: in_progress_transitions,
        expected: "Done",
    },
    Case {
        parent_status: "To Do",
        subtasks: &[StatusCategory::InProgress, StatusCategory::InProgress],
        transitions: ready_for_dev_transitions,
        expected: "In Progress",
    },
    Case {
        parent_status: "Done",
        subtasks: &[StatusCategory::Done, StatusCategory::InProgress],
        transitions: done_transitions,
        expected: "In Progress",
    },
    Case {
        parent_status: "Done",
        subtasks: &[StatusCategory::Done, StatusCategory::ToDo],
        transitions: done_transitions,
        expected: "In Progress",
    },
    Case {
        parent_status: "Done",
        subtasks: &[],
        transitions: done_transitions,
        expected: "To Do",
    },
];

#[tokio::test]
async fn parent_follows_subtask_categories() {
    let map = TargetStatusMap::default();

    for (row, case) in CASES.iter().enumerate() {
        // Subtask ids never collide with the event issue, except for the
        // deleted one appended below.
        let mut subtasks: Vec<(String, StatusCategory)> = case
            .subtasks
            .iter()
            .enumerate()
            .map(|(i, category)| (format!("2{i:04}"), *category))
            .collect();
        let kind = if case.subtasks.is_empty() {
            subtasks.push((EVENT_ISSUE_ID.to_string(), StatusCategory::Done));
            "jira:issue_deleted"
        } else {
            "jira:issue_updated"
        };
        let pairs: Vec<(&str, StatusCategory)> = subtasks
            .iter()
            .map(|(id, category)| (id.as_str(), *category))
            .collect();

        let tracker = ScriptedTracker::new(issue(PARENT, case.parent_status, &pairs))
            .with_transitions((case.transitions)());

        let outcome = handle_event(&tracker, &map, &event(kind))
            .await
            .unwrap_or_else(|err| panic!("row {row}: {err}"));

        let expected_id = (case.transitions)()
            .into_iter()
            .find(|t| t.to == case.expected)
            .map(|t| t.id)
            .unwrap_or_else(|| panic!("row {row}: workflow lacks {}", case.expected));

        assert_eq!(tracker.calls().len(), 3, "row {row}");
        assert_eq!(tracker.posted(), vec![expected_id.clone()], "row {row}");
        assert_eq!(
            outcome,
            SyncOutcome::Transitioned {
                issue: "TPROJ-1".to_string(),
                from: case.parent_status.to_string(),
                to: case.expected.to_string(),
                transition_id: expected_id,
            },
            "row {row}"
        );
    }
}

#[tokio::test]
async fn missing_transition_skips_post() {
    let tracker = ScriptedTracker::new(issue(
        PARENT,
        "To Do",
        &[(EVENT_ISSUE_ID, StatusCategory::InProgress)],
    ))
    .with_transitions(in_progress_transitions());

    let outcome = handle_event(&tracker, &default_map(), &event("jira:issue_updated"))
        .await
        .expect("absorbed");

    assert!(matches!(outcome, SyncOutcome::TransitionNotFound { .. }));
    assert_eq!(
        tracker.calls(),
        vec![
            Call::GetIssue(PARENT.to_string()),
            Call::ListTransitions(PARENT.to_string()),
        ]
    );
}

/// The parent read still lists the deleted subtask; it must not count.
#[tokio::test]
async fn deleted_subtask_still_listed_is_ignored() {
    let tracker = ScriptedTracker::new(issue(
        PARENT,
        "In Progress",
        &[(EVENT_ISSUE_ID, StatusCategory::InProgress)],
    ))
    .with_transitions(in_progress_transitions());

    handle_event(&tracker, &default_map(), &event("jira:issue_deleted"))
        .await
        .expect("sync");

    assert_eq!(tracker.calls().len(), 3);
    assert_eq!(tracker.posted(), vec!["1".to_string()]);
}

#[tokio::test]
async fn deletion_aggregates_remaining_subtasks_only() {
    let tracker = ScriptedTracker::new(issue(
        PARENT,
        "In Progress",
        &[
            ("A", StatusCategory::Done),
            (EVENT_ISSUE_ID, StatusCategory::InProgress),
        ],
    ))
    .with_transitions(in_progress_transitions());

    let outcome = handle_event(&tracker, &default_map(), &event("jira:issue_deleted"))
        .await
        .expect("sync");

    assert!(matches!(outcome, SyncOutcome::Transitioned { ref to, .. } if to == "Done"));
    assert_eq!(tracker.posted(), vec!["21".to_string()]);
}

#[tokio::test]
async fn update_does_not_exclude_event_issue() {
    let tracker = ScriptedTracker::new(issue(
        PARENT,
        "In Progress",
        &[
            ("A", StatusCategory::Done),
            (EVENT_ISSUE_ID, StatusCategory::InProgress),
        ],
    ))
    .with_transitions(in_progress_transitions());

    let outcome = handle_event(&tracker, &default_map(), &event("jira:issue_updated"))
        .await
        .expect("sync");

    assert!(matches!(outcome, SyncOutcome::NotNeeded { .. }));
    assert_eq!(tracker.calls(), vec![Call::GetIssue(PARENT.to_string())]);
}

#[tokio::test]
async fn parent_already_at_target_is_left_alone() {
    let tracker = ScriptedTracker::new(issue(
        PARENT,
        "In Progress",
        &[(EVENT_ISSUE_ID, StatusCategory::InProgress)],
    ));

    handle_event(&tracker, &default_map(), &event("jira:issue_created"))
        .await
        .expect("sync");

    assert_eq!(tracker.calls(), vec![Call::GetIssue(PARENT.to_string())]);
}

#[tokio::test]
async fn parent_in_unknown_status_is_left_alone() {
    let tracker = ScriptedTracker::new(issue(
        PARENT,
        "In Testing",
        &[(EVENT_ISSUE_ID, StatusCategory::InProgress)],
    ))
    .with_transitions(vec![transition("11", "In Progress")]);

    handle_event(&tracker, &default_map(), &event("jira:issue_created"))
        .await
        .expect("sync");

    assert_eq!(tracker.calls(), vec![Call::GetIssue(PARENT.to_string())]);
}

#[tokio::test]
async fn event_from_non_subtask_makes_no_calls() {
    let tracker = ScriptedTracker::new(issue(PARENT, "To Do", &[]));

    let outcome = handle_event(&tracker, &default_map(), &non_subtask_event())
        .await
        .expect("sync");

    assert_eq!(outcome, SyncOutcome::NotASubtask);
    assert!(tracker.calls().is_empty());
}

#[tokio::test]
async fn custom_status_names_drive_targets_and_guard() {
    let map = TargetStatusMap::new("Backlog", "Development", "Closed");
    let tracker = ScriptedTracker::new(issue(
        PARENT,
        "Backlog",
        &[
            ("A", StatusCategory::ToDo),
            ("B", StatusCategory::Done),
        ],
    ))
    .with_transitions(vec![
        transition("5", "Closed"),
        transition("7", "Development"),
    ]);

    handle_event(&tracker, &map, &event("jira:issue_updated"))
        .await
        .expect("sync");

    assert_eq!(tracker.posted(), vec!["7".to_string()]);
}

#[tokio::test]
async fn failed_parent_read_aborts_event() {
    let tracker = ScriptedTracker::new(issue(PARENT, "To Do", &[])).failing_issue(404);

    let err = handle_event(&tracker, &default_map(), &event("jira:issue_updated"))
        .await
        .expect_err("hard failure");

    assert!(matches!(err, TrackerError::Status { status: 404, .. }));
    assert_eq!(tracker.calls(), vec![Call::GetIssue(PARENT.to_string())]);
}

#[tokio::test]
async fn failed_transition_post_aborts_event() {
    let tracker = ScriptedTracker::new(issue(
        PARENT,
        "To Do",
        &[(EVENT_ISSUE_ID, StatusCategory::Done)],
    ))
    .with_transitions(ready_for_dev_transitions())
    .failing_transition(409);

    let err = handle_event(&tracker, &default_map(), &event("jira:issue_updated"))
        .await
        .expect_err("hard failure");

    assert!(matches!(err, TrackerError::Status { status: 409, .. }));
    assert_eq!(tracker.posted(), vec!["21".to_string()]);
}
