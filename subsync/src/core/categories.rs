//! Subtask status summaries used as aggregation input.

use std::collections::BTreeSet;

use crate::core::types::{StatusCategory, Subtask};

/// Subtask ids to leave out of aggregation.
///
/// A deletion webhook can arrive before the parent read stops listing the
/// deleted subtask, so the triggering event names the ids that must not count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingExclusions {
    ids: BTreeSet<String>,
}

impl PendingExclusions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(id: impl Into<String>) -> Self {
        let mut ids = BTreeSet::new();
        ids.insert(id.into());
        Self { ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Distinct status categories present among a parent's subtasks.
///
/// Order and multiplicity of the subtask list are irrelevant: two `Done`
/// subtasks and one `Done` subtask produce the same set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCategorySet(BTreeSet<StatusCategory>);

impl StatusCategorySet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Collect categories from `subtasks`, skipping any id in `exclusions`.
    pub fn from_subtasks(subtasks: &[Subtask], exclusions: &PendingExclusions) -> Self {
        subtasks
            .iter()
            .filter(|subtask| !exclusions.contains(&subtask.id))
            .map(|subtask| subtask.category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The only member, when the set has exactly one.
    pub fn single(&self) -> Option<StatusCategory> {
        let mut iter = self.0.iter();
        match (iter.next(), iter.next()) {
            (Some(category), None) => Some(*category),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = StatusCategory> + '_ {
        self.0.iter().copied()
    }

    /// Labels in stable order, for log fields.
    pub fn labels(&self) -> Vec<&'static str> {
        self.iter().map(StatusCategory::label).collect()
    }
}

impl FromIterator<StatusCategory> for StatusCategorySet {
    fn from_iter<I: IntoIterator<Item = StatusCategory>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
