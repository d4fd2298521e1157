use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};

use crate::timeutil::parse_datetime;
use crate::types::{Priority, Task, UrgentItem, User};
use crate::unifier::UserDirectory;

/// The urgent list never shows more than this many items.
pub const MAX_URGENT_ITEMS: usize = 5;
/// A task due within this horizon is urgent regardless of priority.
const DUE_SOON_HOURS: i64 = 24;

/// Select up to [`MAX_URGENT_ITEMS`] tasks requiring the viewer's immediate
/// attention.
///
/// A candidate task is urgent when ANY of these hold: it is overdue, its
/// priority is high or critical, or it is due within 24 hours. This is an OR,
/// not a weighted score. Results sort ascending by due date (missing or
/// unparsable due dates rank last) and are truncated AFTER sorting, so an
/// overdue item is never dropped in favor of a nearer-future one purely due
/// to list position.
///
/// `isOverdue` is computed from the same `now` used for eligibility, so an
/// item cannot straddle the boundary between classification and display.
pub fn classify_urgent(
    tasks: &[Task],
    users: &[User],
    viewer_id: &str,
    now: DateTime<Utc>,
) -> Vec<UrgentItem> {
    let directory = UserDirectory::new(users);

    let mut urgent: Vec<UrgentItem> = tasks
        .iter()
        .filter(|task| {
            !task.archived
                && task.status != "completed"
                && task.assignee_ids.iter().any(|id| id == viewer_id)
        })
        .filter_map(|task| {
            // An unparsable due date fails both time rules; the priority rule
            // still applies.
            let due = task.due_date.as_deref().and_then(parse_datetime);
            let is_overdue = due.map_or(false, |d| d < now);
            let high_priority = matches!(task.priority, Priority::High | Priority::Critical);
            let due_soon = due.map_or(false, |d| d - now < Duration::hours(DUE_SOON_HOURS));

            if !(is_overdue || high_priority || due_soon) {
                return None;
            }

            Some(UrgentItem {
                id: task.id.clone(),
                title: task.title.clone(),
                due_date: due,
                priority: task.priority.clone(),
                is_overdue,
                members: directory.resolve_all(&task.assignee_ids),
            })
        })
        .collect();

    // Vec::sort_by is stable: ties keep input order.
    urgent.sort_by(|a, b| compare_due_date(a.due_date, b.due_date));
    urgent.truncate(MAX_URGENT_ITEMS);
    urgent
}

/// Earlier dates rank higher. Missing dates rank last.
fn compare_due_date(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_task(id: &str, priority: Priority, due: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            status: "pending".to_string(),
            priority,
            task_type: None,
            department: String::new(),
            assignee_ids: vec!["u1".to_string()],
            start_date: None,
            due_date: due.map(ToString::to_string),
            updated_at: None,
            archived: false,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 12, 15, 0, 0).unwrap()
    }

    fn no_users() -> Vec<User> {
        Vec::new()
    }

    #[test]
    fn due_soon_low_priority_is_urgent() {
        // Due in 2 hours, low priority: the due-soon rule alone includes it.
        let tasks = vec![make_task("t1", Priority::Low, Some("2026-02-12T17:00:00Z"))];
        let urgent = classify_urgent(&tasks, &no_users(), "u1", fixed_now());
        assert_eq!(urgent.len(), 1);
        assert!(!urgent[0].is_overdue);
    }

    #[test]
    fn distant_low_priority_is_not_urgent() {
        let tasks = vec![make_task("t1", Priority::Low, Some("2026-02-22T17:00:00Z"))];
        let urgent = classify_urgent(&tasks, &no_users(), "u1", fixed_now());
        assert!(urgent.is_empty());
    }

    #[test]
    fn orders_by_due_date_regardless_of_input_order() {
        let tasks = vec![
            make_task("c", Priority::Low, Some("2026-02-12T20:00:00Z")), // in 5h
            make_task("a", Priority::Low, Some("2026-02-11T15:00:00Z")), // overdue
            make_task("b", Priority::Low, Some("2026-02-12T16:00:00Z")), // in 1h
        ];
        let urgent = classify_urgent(&tasks, &no_users(), "u1", fixed_now());
        let ids: Vec<&str> = urgent.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(urgent[0].is_overdue);
        assert!(!urgent[1].is_overdue);
    }

    #[test]
    fn truncates_to_five_soonest_after_sorting() {
        // Eight eligible tasks, the overdue one listed last in the input.
        let mut tasks: Vec<Task> = (1..8)
            .map(|h| {
                let due = format!("2026-02-12T{:02}:00:00Z", 15 + h);
                make_task(&format!("t{}", h), Priority::Low, Some(due.as_str()))
            })
            .collect();
        tasks.push(make_task("overdue", Priority::Low, Some("2026-02-10T09:00:00Z")));

        let urgent = classify_urgent(&tasks, &no_users(), "u1", fixed_now());
        assert_eq!(urgent.len(), MAX_URGENT_ITEMS);
        assert_eq!(urgent[0].id, "overdue");
        let ids: Vec<&str> = urgent.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["overdue", "t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn critical_without_due_date_is_urgent_and_ranks_last() {
        let tasks = vec![
            make_task("no-date", Priority::Critical, None),
            make_task("dated", Priority::Low, Some("2026-02-12T16:00:00Z")),
        ];
        let urgent = classify_urgent(&tasks, &no_users(), "u1", fixed_now());
        let ids: Vec<&str> = urgent.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["dated", "no-date"]);
        assert!(!urgent[1].is_overdue);
    }

    #[test]
    fn unparsable_due_date_fails_closed_to_priority_rule() {
        let tasks = vec![
            make_task("low-bad-date", Priority::Low, Some("soon™")),
            make_task("high-bad-date", Priority::High, Some("soon™")),
        ];
        let urgent = classify_urgent(&tasks, &no_users(), "u1", fixed_now());
        let ids: Vec<&str> = urgent.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["high-bad-date"]);
        assert!(urgent[0].due_date.is_none());
    }

    #[test]
    fn completed_and_unassigned_tasks_are_never_candidates() {
        let mut done = make_task("done", Priority::Critical, Some("2026-02-10T09:00:00Z"));
        done.status = "completed".to_string();
        let mut other = make_task("other", Priority::Critical, Some("2026-02-10T09:00:00Z"));
        other.assignee_ids = vec!["u2".to_string()];

        let urgent = classify_urgent(&[done, other], &no_users(), "u1", fixed_now());
        assert!(urgent.is_empty());
    }

    #[test]
    fn resolves_assignees_against_directory() {
        let tasks = vec![make_task("t1", Priority::High, None)];
        let users = vec![User {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            avatar_url: None,
        }];
        let urgent = classify_urgent(&tasks, &users, "u1", fixed_now());
        assert_eq!(urgent[0].members.len(), 1);
        assert_eq!(urgent[0].members[0].name, "Ana");
    }
}
