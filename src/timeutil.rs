//! Timestamp parsing and local-calendar boundary resolution.
//!
//! Source records carry ISO 8601 strings; parsing is lenient (RFC 3339, then
//! naive datetime, then bare date) and failures return `None` so one bad
//! record degrades instead of failing the whole aggregation. Day and week
//! boundaries are computed in the reference date's own local calendar, never
//! UTC, to avoid off-by-one-day shifts near midnight in non-UTC zones.

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;

/// Parse an ISO 8601 timestamp, tolerating common upstream variants.
///
/// Zone-less values are interpreted as UTC instants (the store writes UTC);
/// bare dates resolve to UTC midnight. Returns `None` for anything
/// unparsable — callers treat the record as having no timestamp.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    log::warn!("unparsable timestamp {:?}; excluded from time-based rules", value);
    None
}

/// Resolve a local calendar date's midnight to a UTC instant, handling DST
/// gaps.
///
/// During a spring-forward gap, `earliest()` returns `None`. We fall back to
/// `latest()` (the post-transition instant), and as a last resort interpret
/// the date as UTC.
pub fn local_midnight(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    // Fast path: unambiguous local time.
    if let Some(dt) = tz
        .with_ymd_and_hms(date.year(), date.month(), date.day(), 0, 0, 0)
        .single()
    {
        return dt.with_timezone(&Utc);
    }

    let naive = date.and_time(NaiveTime::MIN);

    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt.with_timezone(&Utc);
    }

    if let Some(dt) = tz.from_local_datetime(&naive).latest() {
        log::warn!(
            "DST gap detected for {} 00:00 in {}; using post-transition time",
            date,
            tz
        );
        return dt.with_timezone(&Utc);
    }

    log::warn!(
        "could not resolve local midnight {} in {}; falling back to UTC",
        date,
        tz
    );
    Utc.from_utc_datetime(&naive)
}

/// The local calendar date `reference` falls on in `tz`.
pub fn local_date(reference: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    reference.with_timezone(tz).date_naive()
}

/// The most recent Sunday at or before `reference`, in `reference`'s local
/// calendar.
pub fn local_week_start(reference: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    let date = local_date(reference, tz);
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}
