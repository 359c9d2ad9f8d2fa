//! Issue tracker abstraction.
//!
//! The [`IssueTracker`] trait decouples orchestration from the REST transport.
//! Production uses [`crate::io::http_tracker::HttpTracker`]; tests use a
//! scripted tracker that records calls without touching the network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{Issue, StatusCategory, Subtask, Transition};

/// Failure of a remote tracker call. Always fatal to the event being handled.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("{method} {url} failed: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    /// The tracker answered with a non-2xx status.
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    /// The response body did not have the expected shape.
    #[error("{method} {url} returned an unreadable body: {message}")]
    Decode {
        method: &'static str,
        url: String,
        message: String,
    },
}

/// The three tracker operations the synchronisation pipeline depends on.
///
/// Implementations are shared by every in-flight event and must be safe for
/// concurrent use.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// `GET <locator>`
    async fn get_issue(&self, locator: &str) -> Result<Issue, TrackerError>;

    /// `GET <locator>/transitions`
    async fn list_transitions(&self, locator: &str) -> Result<Vec<Transition>, TrackerError>;

    /// `POST <locator>/transitions` with `{"transition":{"id":<id>}}`
    async fn perform_transition(
        &self,
        locator: &str,
        transition_id: &str,
    ) -> Result<(), TrackerError>;
}

// Wire shapes of the tracker REST API. Only the fields the pipeline reads are
// modelled; everything else in the payload is ignored.

#[derive(Debug, Clone, Deserialize)]
pub struct IssueRecord {
    #[serde(rename = "self")]
    pub locator: String,
    #[serde(default)]
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueFields {
    pub status: StatusRecord,
    #[serde(default)]
    pub subtasks: Vec<SubtaskRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusRecord {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtaskRecord {
    pub id: String,
    pub fields: SubtaskFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtaskFields {
    pub status: SubtaskStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtaskStatus {
    #[serde(rename = "statusCategory")]
    pub category: CategoryRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub name: StatusCategory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitionList {
    pub transitions: Vec<TransitionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitionRecord {
    pub id: String,
    pub to: StatusRecord,
}

/// Body of `POST <locator>/transitions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRequest {
    pub transition: TransitionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionId {
    pub id: String,
}

impl TransitionRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            transition: TransitionId { id: id.into() },
        }
    }
}

impl From<IssueRecord> for Issue {
    fn from(record: IssueRecord) -> Self {
        Issue {
            locator: record.locator,
            key: record.key,
            status: record.fields.status.name,
            subtasks: record
                .fields
                .subtasks
                .into_iter()
                .map(|subtask| Subtask {
                    id: subtask.id,
                    category: subtask.fields.status.category.name,
                })
                .collect(),
        }
    }
}

impl From<TransitionList> for Vec<Transition> {
    fn from(list: TransitionList) -> Self {
        list.transitions
            .into_iter()
            .map(|record| Transition {
                id: record.id,
                to: record.to.name,
            })
            .collect()
    }
}
