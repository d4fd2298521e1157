//! Near-term meeting selection and classification.
//!
//! Classification priority (first match wins):
//!   1. Client: any external/client participant recorded by name
//!   2. Team: more than 3 internal participants
//!   3. Internal: everything else

use chrono::{DateTime, Duration, Utc};

use crate::timeutil::parse_datetime;
use crate::types::{Meeting, MeetingKind, UpcomingMeeting, User};
use crate::unifier::{UserDirectory, DEFAULT_MEETING_MINUTES};

/// The upcoming list never shows more than this many meetings.
pub const MAX_UPCOMING_MEETINGS: usize = 3;
/// Meetings starting beyond this horizon are not "upcoming".
const UPCOMING_HORIZON_HOURS: i64 = 24;
/// Internal participant count above which a meeting reads as a team meeting.
const TEAM_SIZE_THRESHOLD: usize = 3;

/// Select up to [`MAX_UPCOMING_MEETINGS`] scheduled meetings the viewer is
/// party to, starting within the next 24 hours, soonest first. Truncation
/// happens after sorting. A meeting whose start fails to parse is excluded
/// (fail closed).
pub fn select_upcoming(
    meetings: &[Meeting],
    users: &[User],
    viewer_id: &str,
    now: DateTime<Utc>,
) -> Vec<UpcomingMeeting> {
    let directory = UserDirectory::new(users);
    let horizon = now + Duration::hours(UPCOMING_HORIZON_HOURS);

    let mut upcoming: Vec<UpcomingMeeting> = meetings
        .iter()
        .filter(|meeting| {
            meeting.status == "scheduled"
                && meeting.participant_ids.iter().any(|id| id == viewer_id)
        })
        .filter_map(|meeting| {
            let start = meeting.date.as_deref().and_then(parse_datetime)?;
            if start < now || start > horizon {
                return None;
            }

            let minutes = meeting.duration_minutes.unwrap_or(DEFAULT_MEETING_MINUTES);
            let (location, meeting_url) = if meeting.location_type.as_deref() == Some("online") {
                (None, meeting.location.clone())
            } else {
                (meeting.location.clone(), None)
            };

            Some(UpcomingMeeting {
                id: meeting.id.clone(),
                title: meeting.title.clone(),
                start,
                end: start + Duration::minutes(minutes),
                meeting_type: classify_meeting_kind(meeting),
                participants: directory.resolve_all(&meeting.participant_ids),
                client_names: meeting.client_names.clone(),
                location,
                meeting_url,
            })
        })
        .collect();

    upcoming.sort_by_key(|meeting| meeting.start);
    upcoming.truncate(MAX_UPCOMING_MEETINGS);
    upcoming
}

fn classify_meeting_kind(meeting: &Meeting) -> MeetingKind {
    if !meeting.client_names.is_empty() {
        return MeetingKind::Client;
    }
    if meeting.participant_ids.len() > TEAM_SIZE_THRESHOLD {
        return MeetingKind::Team;
    }
    MeetingKind::Internal
}
