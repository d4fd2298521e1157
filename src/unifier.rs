//! Unified work-item assembly.
//!
//! Converts heterogeneous source records (tasks, meetings, content posts)
//! into the flat [`WorkItem`] timeline for a single viewer. The unifier does
//! not sort; ordering belongs to sort/filter consumers. Pure function of its
//! inputs plus the threaded `now` (used only for the unscheduled-post
//! default).

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::timeutil::parse_datetime;
use crate::types::{ContentPost, Meeting, Member, Task, User, WorkItem, WorkItemKind, WorkItemSource};

/// Meetings always classify under the management department.
pub const MEETING_DEPARTMENT: &str = "Management";
/// Content posts always classify under the creative department.
pub const CONTENT_DEPARTMENT: &str = "Creative";
/// Meeting length when the record carries no duration.
pub const DEFAULT_MEETING_MINUTES: i64 = 60;
/// Fixed display window for a scheduled content post.
const POST_WINDOW_MINUTES: i64 = 60;

/// Id-indexed view over the user directory.
///
/// Lookup misses are a documented contract, not an error: a participant or
/// assignee id with no matching user is silently dropped from `members`.
pub struct UserDirectory<'a> {
    by_id: HashMap<&'a str, &'a User>,
}

impl<'a> UserDirectory<'a> {
    pub fn new(users: &'a [User]) -> Self {
        let mut by_id = HashMap::with_capacity(users.len());
        for user in users {
            by_id.insert(user.id.as_str(), user);
        }
        Self { by_id }
    }

    pub fn resolve(&self, id: &str) -> Option<Member> {
        self.by_id.get(id).map(|user| Member {
            id: user.id.clone(),
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
        })
    }

    /// Resolve a list of ids, dropping any that are missing from the
    /// directory. Resolution preserves input order.
    pub fn resolve_all(&self, ids: &[String]) -> Vec<Member> {
        ids.iter().filter_map(|id| self.resolve(id)).collect()
    }
}

/// Build the viewer's unified timeline from the raw source collections.
///
/// Inclusion per kind:
/// - task: not archived, not completed, viewer among assignees
/// - meeting: scheduled, viewer among participants
/// - content post: viewer is the responsible manager, not yet published
///
/// A post with no publish time defaults its `startTime` to `now`, so
/// unscheduled posts always appear to start at the moment of computation.
pub fn unify_work_items(
    tasks: &[Task],
    meetings: &[Meeting],
    posts: &[ContentPost],
    users: &[User],
    viewer_id: &str,
    now: DateTime<Utc>,
) -> Vec<WorkItem> {
    let directory = UserDirectory::new(users);
    let mut items = Vec::new();

    for task in tasks {
        if task.archived || task.status == "completed" {
            continue;
        }
        if !task.assignee_ids.iter().any(|id| id == viewer_id) {
            continue;
        }

        items.push(WorkItem {
            id: task.id.clone(),
            kind: WorkItemKind::Task,
            title: task.title.clone(),
            start_time: task.start_date.as_deref().and_then(parse_datetime),
            end_time: task.due_date.as_deref().and_then(parse_datetime),
            department: task.department.clone(),
            status: task.status.clone(),
            members: directory.resolve_all(&task.assignee_ids),
            subtype: task.task_type.clone(),
            source: WorkItemSource::Task(task.clone()),
        });
    }

    for meeting in meetings {
        if meeting.status != "scheduled" {
            continue;
        }
        if !meeting.participant_ids.iter().any(|id| id == viewer_id) {
            continue;
        }

        let start = meeting.date.as_deref().and_then(parse_datetime);
        let minutes = meeting.duration_minutes.unwrap_or(DEFAULT_MEETING_MINUTES);
        items.push(WorkItem {
            id: meeting.id.clone(),
            kind: WorkItemKind::Meeting,
            title: meeting.title.clone(),
            start_time: start,
            end_time: start.map(|s| s + Duration::minutes(minutes)),
            department: MEETING_DEPARTMENT.to_string(),
            status: meeting.status.clone(),
            members: directory.resolve_all(&meeting.participant_ids),
            subtype: Some(WorkItemKind::Meeting.as_str().to_string()),
            source: WorkItemSource::Meeting(meeting.clone()),
        });
    }

    for post in posts {
        if post.manager_id.as_deref() != Some(viewer_id) || post.status == "published" {
            continue;
        }

        let start = post
            .publish_at
            .as_deref()
            .and_then(parse_datetime)
            .unwrap_or(now);
        let members = post
            .manager_id
            .as_deref()
            .and_then(|id| directory.resolve(id))
            .into_iter()
            .collect();
        items.push(WorkItem {
            id: post.id.clone(),
            kind: WorkItemKind::ContentPost,
            title: post.title.clone(),
            start_time: Some(start),
            end_time: Some(start + Duration::minutes(POST_WINDOW_MINUTES)),
            department: CONTENT_DEPARTMENT.to_string(),
            status: post.status.clone(),
            members,
            subtype: Some(WorkItemKind::ContentPost.as_str().to_string()),
            source: WorkItemSource::ContentPost(post.clone()),
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            avatar_url: Some(format!("https://avatars.test/{}.png", id)),
        }
    }

    fn make_task(id: &str, status: &str, assignees: &[&str]) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            status: status.to_string(),
            priority: crate::types::Priority::Medium,
            task_type: Some("design".to_string()),
            department: "Design".to_string(),
            assignee_ids: assignees.iter().map(ToString::to_string).collect(),
            start_date: Some("2026-02-10T09:00:00Z".to_string()),
            due_date: Some("2026-02-13T17:00:00Z".to_string()),
            updated_at: None,
            archived: false,
        }
    }

    fn make_meeting(id: &str, status: &str, participants: &[&str]) -> Meeting {
        Meeting {
            id: id.to_string(),
            title: format!("Meeting {}", id),
            date: Some("2026-02-12T15:00:00Z".to_string()),
            duration_minutes: Some(30),
            status: status.to_string(),
            participant_ids: participants.iter().map(ToString::to_string).collect(),
            client_names: Vec::new(),
            location_type: None,
            location: None,
        }
    }

    fn make_post(id: &str, status: &str, manager: Option<&str>) -> ContentPost {
        ContentPost {
            id: id.to_string(),
            title: format!("Post {}", id),
            status: status.to_string(),
            publish_at: Some("2026-02-12T18:00:00Z".to_string()),
            manager_id: manager.map(ToString::to_string),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 12, 15, 0, 0).unwrap()
    }

    #[test]
    fn includes_only_viewer_visible_records() {
        let tasks = vec![
            make_task("t1", "pending", &["u1"]),
            make_task("t2", "pending", &["u2"]),
        ];
        let meetings = vec![
            make_meeting("m1", "scheduled", &["u1", "u2"]),
            make_meeting("m2", "scheduled", &["u2"]),
        ];
        let posts = vec![
            make_post("p1", "draft", Some("u1")),
            make_post("p2", "draft", Some("u2")),
        ];
        let users = vec![make_user("u1", "Ana"), make_user("u2", "Ben")];

        let items = unify_work_items(&tasks, &meetings, &posts, &users, "u1", fixed_now());
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "m1", "p1"]);
    }

    #[test]
    fn excludes_completed_archived_and_published() {
        let mut archived = make_task("t2", "pending", &["u1"]);
        archived.archived = true;
        let tasks = vec![make_task("t1", "completed", &["u1"]), archived];
        let meetings = vec![make_meeting("m1", "cancelled", &["u1"])];
        let posts = vec![make_post("p1", "published", Some("u1"))];
        let users = vec![make_user("u1", "Ana")];

        let items = unify_work_items(&tasks, &meetings, &posts, &users, "u1", fixed_now());
        assert!(items.is_empty());
    }

    #[test]
    fn unresolved_member_is_dropped_without_dropping_item() {
        let tasks = vec![make_task("t1", "pending", &["u1", "ghost"])];
        let users = vec![make_user("u1", "Ana")];

        let items = unify_work_items(&tasks, &[], &[], &users, "u1", fixed_now());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].members.len(), 1);
        assert_eq!(items[0].members[0].id, "u1");
    }

    #[test]
    fn meeting_window_spans_its_duration() {
        let meetings = vec![make_meeting("m1", "scheduled", &["u1"])];
        let users = vec![make_user("u1", "Ana")];

        let items = unify_work_items(&[], &meetings, &[], &users, "u1", fixed_now());
        let start = items[0].start_time.unwrap();
        let end = items[0].end_time.unwrap();
        assert_eq!((end - start).num_minutes(), 30);
        assert_eq!(items[0].department, MEETING_DEPARTMENT);
        assert_eq!(items[0].subtype.as_deref(), Some("meeting"));
    }

    #[test]
    fn unscheduled_post_starts_now() {
        let mut post = make_post("p1", "draft", Some("u1"));
        post.publish_at = None;
        let users = vec![make_user("u1", "Ana")];
        let now = fixed_now();

        let items = unify_work_items(&[], &[], &[post], &users, "u1", now);
        assert_eq!(items[0].start_time, Some(now));
        assert_eq!(items[0].end_time, Some(now + Duration::minutes(60)));
        assert_eq!(items[0].department, CONTENT_DEPARTMENT);
    }

    #[test]
    fn unparsable_task_dates_yield_none_not_exclusion() {
        let mut task = make_task("t1", "pending", &["u1"]);
        task.start_date = Some("yesterday-ish".to_string());
        task.due_date = None;
        let users = vec![make_user("u1", "Ana")];

        let items = unify_work_items(&[task], &[], &[], &users, "u1", fixed_now());
        assert_eq!(items.len(), 1);
        assert!(items[0].start_time.is_none());
        assert!(items[0].end_time.is_none());
    }
}
