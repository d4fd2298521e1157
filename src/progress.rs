use chrono::{DateTime, Utc};

use crate::types::WorkItem;

/// An in-progress item never reads below this.
const PROGRESS_FLOOR: i64 = 10;
/// An in-progress item never reads above this.
const PROGRESS_CEILING: i64 = 90;

/// Estimate completion of a task-origin work item as an integer percentage.
///
/// - `completed` → 100.
/// - `in_progress` → linear interpolation of elapsed time over total
///   duration, clamped to [10, 90] so an item nominally in progress never
///   displays as "not started" or "done". A degenerate window
///   (`endTime <= startTime`, or either endpoint missing) reads as the
///   ceiling rather than dividing by zero.
/// - Any other status → 0.
pub fn estimate_progress(item: &WorkItem, now: DateTime<Utc>) -> u8 {
    match item.status.as_str() {
        "completed" => 100,
        "in_progress" => {
            let (start, end) = match (item.start_time, item.end_time) {
                (Some(start), Some(end)) => (start, end),
                _ => return PROGRESS_CEILING as u8,
            };

            let total = (end - start).num_seconds();
            if total <= 0 {
                return PROGRESS_CEILING as u8;
            }

            let elapsed = (now - start).num_seconds();
            let percent = elapsed.saturating_mul(100) / total;
            percent.clamp(PROGRESS_FLOOR, PROGRESS_CEILING) as u8
        }
        _ => 0,
    }
}
