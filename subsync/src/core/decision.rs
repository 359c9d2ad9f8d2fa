//! Transition decision rules.
//!
//! Pure half of the orchestrator: whether a parent needs to move at all, and
//! which listed workflow edge reaches the target. Remote calls live in
//! [`crate::sync`].

use serde::Serialize;

use crate::core::target_map::TargetStatusMap;
use crate::core::types::Transition;

/// Why no transition is attempted for an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Current status already equals the target.
    AlreadyAtTarget,
    /// Current status is outside the managed vocabulary.
    Unmanaged,
}

/// Result of the no-op guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip(SkipReason),
    Move,
}

/// Decide whether an issue in `current` should be moved to `target`.
///
/// Equality is checked first, so a parent already at its target reports
/// [`SkipReason::AlreadyAtTarget`] even when that status is unmanaged.
pub fn decide(map: &TargetStatusMap, current: &str, target: &str) -> Decision {
    if current == target {
        Decision::Skip(SkipReason::AlreadyAtTarget)
    } else if !map.is_managed(current) {
        Decision::Skip(SkipReason::Unmanaged)
    } else {
        Decision::Move
    }
}

/// First transition, in the order the tracker listed them, leading to `target`.
pub fn select_transition<'a>(
    transitions: &'a [Transition],
    target: &str,
) -> Option<&'a Transition> {
    transitions.iter().find(|transition| transition.to == target)
}
