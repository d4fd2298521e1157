//! Rolling productivity statistics for a single viewer.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::timeutil::{local_midnight, local_week_start, parse_datetime};
use crate::types::{StatsSnapshot, Task, TypeCount, WeekActivity};

/// The histogram always covers this many weeks, current week last.
const WEEKLY_ACTIVITY_WEEKS: i64 = 4;
/// Bucket for tasks with no type tag.
const DEFAULT_TASK_TYPE: &str = "other";

/// Compute the viewer's statistics snapshot from the raw task collection.
///
/// Rates use a zero-guarded denominator: a viewer with no assigned tasks
/// gets `completionRate = 0` and `unfinishedRate = 0`, never NaN. The two
/// rates round independently and may not sum to exactly 100.
///
/// `weeklyActivity` is exactly [`WEEKLY_ACTIVITY_WEEKS`] entries, oldest
/// first, labeled `W1..W4`, each counting completed tasks whose latest
/// `updatedAt` falls inside that Sunday-anchored local week. The aggregator
/// has no history: it reflects present state, so a task re-opened and
/// re-completed counts only under its latest `updatedAt`.
pub fn compute_stats(tasks: &[Task], viewer_id: &str, now: DateTime<Utc>, tz: &Tz) -> StatsSnapshot {
    let assigned: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.assignee_ids.iter().any(|id| id == viewer_id))
        .collect();

    let total = assigned.len() as u32;
    let completed = assigned
        .iter()
        .filter(|task| task.status == "completed")
        .count() as u32;
    let denominator = total.max(1);

    let completion_rate = round_rate(completed, denominator);
    let unfinished_rate = round_rate(total - completed, denominator);

    let mut type_distribution: Vec<TypeCount> = Vec::new();
    for task in assigned.iter().filter(|task| !task.archived) {
        let tag = task
            .task_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TASK_TYPE);
        match type_distribution.iter_mut().find(|tc| tc.task_type == tag) {
            Some(bucket) => bucket.count += 1,
            None => type_distribution.push(TypeCount {
                task_type: tag.to_string(),
                count: 1,
            }),
        }
    }

    let current_week_start = local_week_start(now, tz);
    let mut weekly_activity = Vec::with_capacity(WEEKLY_ACTIVITY_WEEKS as usize);
    for offset in (0..WEEKLY_ACTIVITY_WEEKS).rev() {
        let week_date = current_week_start - Duration::days(7 * offset);
        let week_start = local_midnight(tz, week_date);
        let week_end = local_midnight(tz, week_date + Duration::days(7));

        let completed_in_week = assigned
            .iter()
            .filter(|task| task.status == "completed")
            .filter(|task| {
                task.updated_at
                    .as_deref()
                    .and_then(parse_datetime)
                    .map_or(false, |updated| updated >= week_start && updated < week_end)
            })
            .count() as u32;

        weekly_activity.push(WeekActivity {
            label: format!("W{}", WEEKLY_ACTIVITY_WEEKS - offset),
            completed: completed_in_week,
        });
    }

    StatsSnapshot {
        completion_rate,
        unfinished_rate,
        type_distribution,
        weekly_activity,
    }
}

fn round_rate(count: u32, denominator: u32) -> u32 {
    (f64::from(count) * 100.0 / f64::from(denominator)).round() as u32
}
