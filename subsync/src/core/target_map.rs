//! Bidirectional table between category sets and managed status names.
//!
//! The forward direction drives aggregation; the reverse direction defines
//! which statuses the system is allowed to move an issue out of. Both read the
//! same three names, so the managed vocabulary is exactly the table's range.

use crate::core::categories::StatusCategorySet;
use crate::core::types::{StatusCategory, TargetSlot};

/// Configured status names for the three managed slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStatusMap {
    ready_for_dev: String,
    in_progress: String,
    done: String,
}

impl TargetStatusMap {
    /// Callers are expected to pass validated, pairwise distinct names
    /// (see `StatusNames::validate`); with duplicates the reverse lookup
    /// reports the first matching slot.
    pub fn new(
        ready_for_dev: impl Into<String>,
        in_progress: impl Into<String>,
        done: impl Into<String>,
    ) -> Self {
        Self {
            ready_for_dev: ready_for_dev.into(),
            in_progress: in_progress.into(),
            done: done.into(),
        }
    }

    /// Status name configured for `slot`.
    pub fn name(&self, slot: TargetSlot) -> &str {
        match slot {
            TargetSlot::ReadyForDev => &self.ready_for_dev,
            TargetSlot::InProgress => &self.in_progress,
            TargetSlot::Done => &self.done,
        }
    }

    /// Forward lookup. Only the empty set and the three known singletons are
    /// keys; every other set is `None`.
    pub fn slot_for(categories: &StatusCategorySet) -> Option<TargetSlot> {
        if categories.is_empty() {
            return Some(TargetSlot::ReadyForDev);
        }
        match categories.single()? {
            StatusCategory::ToDo => Some(TargetSlot::ReadyForDev),
            StatusCategory::InProgress => Some(TargetSlot::InProgress),
            StatusCategory::Done => Some(TargetSlot::Done),
            StatusCategory::Unrecognized => None,
        }
    }

    /// Slot used for sets the table has no key for (mixed categories).
    pub fn fallback_slot() -> TargetSlot {
        TargetSlot::InProgress
    }

    /// Reverse lookup: which slot a status name occupies, if any.
    pub fn slot_of(&self, status: &str) -> Option<TargetSlot> {
        TargetSlot::ALL
            .into_iter()
            .find(|slot| self.name(*slot) == status)
    }

    /// True when `status` is in the table's range.
    pub fn is_managed(&self, status: &str) -> bool {
        self.slot_of(status).is_some()
    }

    /// `(slot, name)` pairs in slot order.
    pub fn entries(&self) -> impl Iterator<Item = (TargetSlot, &str)> + '_ {
        TargetSlot::ALL
            .into_iter()
            .map(move |slot| (slot, self.name(slot)))
    }
}

impl Default for TargetStatusMap {
    fn default() -> Self {
        Self::new("To Do", "In Progress", "Done")
    }
}
