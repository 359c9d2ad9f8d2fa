//! Shared deterministic types for the synchronisation core.
//!
//! These types describe the tracker entities the core reasons about. They are
//! rebuilt from live remote reads on every event and never persisted.

use serde::{Deserialize, Serialize};

/// Coarse classification the tracker attaches to every workflow status.
///
/// Decoded from the category *name* the tracker reports. Names other than the
/// three known ones collapse into [`StatusCategory::Unrecognized`], which keeps
/// any set containing it out of the target table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StatusCategory {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
    #[serde(other)]
    Unrecognized,
}

impl StatusCategory {
    pub fn label(self) -> &'static str {
        match self {
            StatusCategory::ToDo => "To Do",
            StatusCategory::InProgress => "In Progress",
            StatusCategory::Done => "Done",
            StatusCategory::Unrecognized => "Unrecognized",
        }
    }
}

/// One of the three managed positions a parent issue can be steered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSlot {
    ReadyForDev,
    InProgress,
    Done,
}

impl TargetSlot {
    pub const ALL: [TargetSlot; 3] = [
        TargetSlot::ReadyForDev,
        TargetSlot::InProgress,
        TargetSlot::Done,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TargetSlot::ReadyForDev => "ready_for_dev",
            TargetSlot::InProgress => "in_progress",
            TargetSlot::Done => "done",
        }
    }
}

/// Subtask summary as listed on its parent: only the id and status category matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
    pub id: String,
    pub category: StatusCategory,
}

/// A parent issue as read from the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Absolute URL of the issue resource; transitions live under `<locator>/transitions`.
    pub locator: String,
    pub key: String,
    pub status: String,
    pub subtasks: Vec<Subtask>,
}

impl Issue {
    pub fn transitions_locator(&self) -> String {
        transitions_locator(&self.locator)
    }
}

/// `<locator>/transitions`, tolerating a trailing slash on the locator.
pub fn transitions_locator(locator: &str) -> String {
    format!("{}/transitions", locator.trim_end_matches('/'))
}

/// A workflow edge available from an issue's current status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub id: String,
    pub to: String,
}
