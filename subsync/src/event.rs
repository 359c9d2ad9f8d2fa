//! Inbound webhook events and their preprocessing.

use serde::{Deserialize, Serialize};

use crate::core::categories::PendingExclusions;

/// Event discriminator sent in `webhookEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "jira:issue_created")]
    Created,
    #[serde(rename = "jira:issue_updated")]
    Updated,
    #[serde(rename = "jira:issue_deleted")]
    Deleted,
    /// Any other discriminator; handled like an update.
    #[serde(other)]
    Other,
}

/// Webhook payload for an issue event. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "webhookEvent")]
    pub kind: EventKind,
    pub issue: EventIssue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventIssue {
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub fields: EventFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,
}

/// Reference to the parent issue resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    #[serde(rename = "self")]
    pub locator: String,
}

impl WebhookEvent {
    /// Locator of the parent issue; `None` when the event is not about a subtask.
    pub fn parent_locator(&self) -> Option<&str> {
        self.issue
            .fields
            .parent
            .as_ref()
            .map(|parent| parent.locator.as_str())
            .filter(|locator| !locator.is_empty())
    }

    /// Subtask ids the parent read must not count for this event.
    pub fn exclusions(&self) -> PendingExclusions {
        match self.kind {
            EventKind::Deleted => PendingExclusions::of(self.issue.id.clone()),
            EventKind::Created | EventKind::Updated | EventKind::Other => {
                PendingExclusions::none()
            }
        }
    }
}
