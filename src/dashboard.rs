//! Dashboard assembly.
//!
//! One entry point produces all four derived outputs from one captured `now`.
//! Taking the clock independently inside each sub-computation is a
//! correctness bug: urgency, progress, and week-boundary classification must
//! agree on the present moment for a single coherent snapshot.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::stats::compute_stats;
use crate::types::{ContentPost, DashboardData, Meeting, Task, User};
use crate::unifier::unify_work_items;
use crate::upcoming::select_upcoming;
use crate::urgency::classify_urgent;

/// Assemble the viewer's dashboard from a snapshot of the source collections
/// and an explicit reference instant. Deterministic for fixed inputs and a
/// fixed `now`.
pub fn build_dashboard(
    tasks: &[Task],
    meetings: &[Meeting],
    posts: &[ContentPost],
    users: &[User],
    viewer_id: &str,
    now: DateTime<Utc>,
    tz: &Tz,
) -> DashboardData {
    DashboardData {
        timeline: unify_work_items(tasks, meetings, posts, users, viewer_id, now),
        urgent: classify_urgent(tasks, users, viewer_id, now),
        stats: compute_stats(tasks, viewer_id, now, tz),
        upcoming: select_upcoming(meetings, users, viewer_id, now),
    }
}

/// Convenience wrapper that captures the wall clock exactly once and
/// delegates to [`build_dashboard`].
pub fn build_dashboard_at_current_time(
    tasks: &[Task],
    meetings: &[Meeting],
    posts: &[ContentPost],
    users: &[User],
    viewer_id: &str,
    tz: &Tz,
) -> DashboardData {
    let now = Utc::now();
    build_dashboard(tasks, meetings, posts, users, viewer_id, now, tz)
}
