//! Test-only helpers: a scripted tracker and entity builders.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::types::{Issue, StatusCategory, Subtask, Transition, transitions_locator};
use crate::io::tracker::{IssueTracker, TrackerError};

/// A remote call observed by [`ScriptedTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetIssue(String),
    ListTransitions(String),
    PerformTransition(String, String),
}

/// In-memory tracker returning predetermined responses and recording every call.
pub struct ScriptedTracker {
    issue: Issue,
    transitions: Vec<Transition>,
    issue_failure: Option<u16>,
    transition_failure: Option<u16>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTracker {
    /// Tracker serving `issue` with no available transitions.
    pub fn new(issue: Issue) -> Self {
        Self {
            issue,
            transitions: Vec::new(),
            issue_failure: None,
            transition_failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_transitions(mut self, transitions: Vec<Transition>) -> Self {
        self.transitions = transitions;
        self
    }

    /// Make `GET <issue>` answer with HTTP `status`.
    pub fn failing_issue(mut self, status: u16) -> Self {
        self.issue_failure = Some(status);
        self
    }

    /// Make `POST <issue>/transitions` answer with HTTP `status`.
    pub fn failing_transition(mut self, status: u16) -> Self {
        self.transition_failure = Some(status);
        self
    }

    /// The scripted issue, as `get_issue` would return it.
    pub fn issue(&self) -> Issue {
        self.issue.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Transition ids posted so far, in order.
    pub fn posted(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::PerformTransition(_, id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl IssueTracker for ScriptedTracker {
    async fn get_issue(&self, locator: &str) -> Result<Issue, TrackerError> {
        self.record(Call::GetIssue(locator.to_string()));
        if let Some(status) = self.issue_failure {
            return Err(TrackerError::Status {
                method: "GET",
                url: locator.to_string(),
                status,
            });
        }
        Ok(self.issue.clone())
    }

    async fn list_transitions(&self, locator: &str) -> Result<Vec<Transition>, TrackerError> {
        self.record(Call::ListTransitions(locator.to_string()));
        Ok(self.transitions.clone())
    }

    async fn perform_transition(
        &self,
        locator: &str,
        transition_id: &str,
    ) -> Result<(), TrackerError> {
        self.record(Call::PerformTransition(
            locator.to_string(),
            transition_id.to_string(),
        ));
        if let Some(status) = self.transition_failure {
            return Err(TrackerError::Status {
                method: "POST",
                url: transitions_locator(locator),
                status,
            });
        }
        Ok(())
    }
}

/// Parent issue `TPROJ-1` at `locator` with the given subtask `(id, category)` pairs.
pub fn issue(locator: &str, status: &str, subtasks: &[(&str, StatusCategory)]) -> Issue {
    Issue {
        locator: locator.to_string(),
        key: "TPROJ-1".to_string(),
        status: status.to_string(),
        subtasks: subtasks
            .iter()
            .map(|(id, category)| Subtask {
                id: id.to_string(),
                category: *category,
            })
            .collect(),
    }
}

pub fn transition(id: &str, to: &str) -> Transition {
    Transition {
        id: id.to_string(),
        to: to.to_string(),
    }
}

/// Transitions available from `To Do` in the default workflow.
pub fn ready_for_dev_transitions() -> Vec<Transition> {
    vec![transition("11", "In Progress"), transition("21", "Done")]
}

/// Transitions available from `In Progress` in the default workflow.
pub fn in_progress_transitions() -> Vec<Transition> {
    vec![transition("1", "To Do"), transition("21", "Done")]
}

/// Transitions available from `Done` in the default workflow.
pub fn done_transitions() -> Vec<Transition> {
    vec![transition("1", "To Do"), transition("11", "In Progress")]
}
