use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Source records
// =============================================================================
//
// These mirror the upstream store's shape. The engine only reads them; keeping
// collections fresh is the caller's job.

/// Task priority level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

/// A task record as synced from the upstream store.
///
/// Date fields are ISO 8601 strings; they are parsed lazily at computation
/// time so one malformed record degrades (fails closed) instead of poisoning
/// the whole collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle state (`pending`, `in_progress`, `completed`, ...).
    pub status: String,
    #[serde(default)]
    pub priority: Priority,
    /// Free-form tag used for color/legend grouping downstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub assignee_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// A meeting record as synced from the upstream store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub title: String,
    /// ISO 8601 start timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    /// Lifecycle state (`scheduled`, `cancelled`, `completed`, ...).
    pub status: String,
    /// Internal participants, by user directory id.
    #[serde(default)]
    pub participant_ids: Vec<String>,
    /// External/client participants, recorded by display name only.
    #[serde(default)]
    pub client_names: Vec<String>,
    /// `online` or a physical location kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    /// Join URL when `locationType` is `online`, room/address otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A scheduled content post as synced from the upstream store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPost {
    pub id: String,
    pub title: String,
    /// Lifecycle state (`draft`, `scheduled`, `published`, ...).
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_at: Option<String>,
    /// Responsible manager's user directory id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

/// A user directory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

// =============================================================================
// Derived model
// =============================================================================
//
// Everything below is recomputed from scratch on every invocation and should
// be treated as an immutable value once produced.

/// Discriminant for the unified work-item model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemKind {
    Task,
    Meeting,
    ContentPost,
}

impl WorkItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkItemKind::Task => "task",
            WorkItemKind::Meeting => "meeting",
            WorkItemKind::ContentPost => "content_post",
        }
    }
}

/// A resolved participant/assignee.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// The originating record behind a [`WorkItem`], carried through for
/// click-navigation only. The aggregation logic never inspects it, and it is
/// skipped on serialization (serializing consumers pair `id` with `kind`
/// instead).
#[derive(Debug, Clone)]
pub enum WorkItemSource {
    Task(Task),
    Meeting(Meeting),
    ContentPost(ContentPost),
}

/// The unified timeline entry every aggregation step consumes and produces.
///
/// `id` is unique within its source kind only — a task and a meeting can
/// coincidentally share an id value, so consumers must pair `id` with `kind`.
///
/// `startTime`/`endTime` are `None` when the source date was missing or
/// failed to parse; every downstream predicate treats `None` as false.
/// `endTime >= startTime` is NOT guaranteed by upstream data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub kind: WorkItemKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub department: String,
    pub status: String,
    pub members: Vec<Member>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing)]
    pub source: WorkItemSource,
}

/// A task requiring the viewer's immediate attention.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgentItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub is_overdue: bool,
    pub members: Vec<Member>,
}

/// Derived meeting classification for the upcoming-meetings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingKind {
    Client,
    Team,
    Internal,
}

/// A near-term meeting for the viewer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingMeeting {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub meeting_type: MeetingKind,
    pub participants: Vec<Member>,
    pub client_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
}

/// One bucket of the task-type distribution. Buckets keep the insertion
/// order of first occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    pub task_type: String,
    pub count: u32,
}

/// One week of the rolling completed-count histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekActivity {
    pub label: String,
    pub completed: u32,
}

/// Rolling productivity statistics for a single viewer.
///
/// `completionRate + unfinishedRate` may not sum to exactly 100 due to
/// independent rounding; this is accepted, not corrected.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub completion_rate: u32,
    pub unfinished_rate: u32,
    pub type_distribution: Vec<TypeCount>,
    pub weekly_activity: Vec<WeekActivity>,
}

/// Complete dashboard payload assembled from one captured `now`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub timeline: Vec<WorkItem>,
    pub urgent: Vec<UrgentItem>,
    pub stats: StatsSnapshot,
    pub upcoming: Vec<UpcomingMeeting>,
}
