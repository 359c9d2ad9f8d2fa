//! Aggregation of subtask categories into a parent target status.

use crate::core::categories::StatusCategorySet;
use crate::core::target_map::TargetStatusMap;

/// Target status name for a parent whose subtasks span `categories`.
///
/// Total over every subset of the category universe:
/// - no subtasks, or all `To Do` → ready-for-dev name
/// - all `In Progress` → in-progress name
/// - all `Done` → done name
/// - anything mixed → in-progress name
pub fn aggregate<'a>(map: &'a TargetStatusMap, categories: &StatusCategorySet) -> &'a str {
    let slot =
        TargetStatusMap::slot_for(categories).unwrap_or_else(TargetStatusMap::fallback_slot);
    map.name(slot)
}
