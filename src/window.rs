//! Calendar-window and attribute filtering over the unified timeline.
//!
//! All filters are pure predicates applied conjunctively; order of
//! application cannot change the result. Window boundaries come from the
//! reference instant's own local calendar, never UTC.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::timeutil::{local_date, local_midnight, local_week_start};
use crate::types::WorkItem;

/// Calendar window for timeline filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// [local midnight, local midnight + 1 day)
    Today,
    /// [Sunday local midnight, next Sunday local midnight)
    Week,
}

/// Half-open UTC bounds of `window` around the reference instant `now`.
pub fn window_bounds(window: TimeWindow, now: DateTime<Utc>, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    match window {
        TimeWindow::Today => {
            let today = local_date(now, tz);
            (
                local_midnight(tz, today),
                local_midnight(tz, today + Duration::days(1)),
            )
        }
        TimeWindow::Week => {
            let week_start = local_week_start(now, tz);
            (
                local_midnight(tz, week_start),
                local_midnight(tz, week_start + Duration::days(7)),
            )
        }
    }
}

/// Restrict `items` to a department, a title search, and a calendar window.
///
/// - `department: None` means no department filtering; otherwise an exact
///   match on `department`.
/// - `search` is a case-insensitive substring match against `title` only;
///   an empty (or whitespace) search matches everything.
/// - An item whose `startTime` is missing never matches a window.
pub fn filter_items(
    items: &[WorkItem],
    department: Option<&str>,
    search: &str,
    window: TimeWindow,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<WorkItem> {
    let (window_start, window_end) = window_bounds(window, now, tz);
    let needle = search.trim().to_lowercase();

    items
        .iter()
        .filter(|item| {
            if let Some(dept) = department {
                if item.department != dept {
                    return false;
                }
            }
            if !needle.is_empty() && !item.title.to_lowercase().contains(&needle) {
                return false;
            }
            item.start_time
                .map_or(false, |start| start >= window_start && start < window_end)
        })
        .cloned()
        .collect()
}
