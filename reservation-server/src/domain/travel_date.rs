//! Travel date handling.
//!
//! Reservation dates are stored as the strings the client submitted. This
//! module turns them into UTC instants and measures whole days between an
//! instant and "now". Values without an offset are taken as UTC, and a bare
//! calendar date means midnight UTC on that day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Error returned when a stored travel date cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised travel date: {input:?}")]
pub struct DateParseError {
    input: String,
}

/// Lead time reported for a date that cannot be parsed.
///
/// Large enough to pass any minimum lead-time rule.
pub const UNPARSABLE_LEAD_TIME: i64 = i64::MAX;

/// Date-time layouts accepted in addition to RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Calendar-date layouts.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a stored travel date into a UTC instant.
///
/// # Examples
///
/// ```
/// use reservation_server::domain::parse_travel_instant;
///
/// let a = parse_travel_instant("2026-03-01").unwrap();
/// let b = parse_travel_instant("2026-03-01T00:00:00Z").unwrap();
/// assert_eq!(a, b);
///
/// assert!(parse_travel_instant("next tuesday").is_err());
/// ```
pub fn parse_travel_instant(s: &str) -> Result<DateTime<Utc>, DateParseError> {
    let trimmed = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }

    Err(DateParseError {
        input: s.to_string(),
    })
}

/// Whole days from `from` to `to`, truncated toward zero.
///
/// Negative when `to` is before `from`.
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Whole days remaining between `now` and the travel date.
///
/// Returns [`UNPARSABLE_LEAD_TIME`] when the date cannot be parsed.
pub fn lead_time_days(travel_date: &str, now: DateTime<Utc>) -> i64 {
    match parse_travel_instant(travel_date) {
        Ok(instant) => whole_days_between(now, instant),
        Err(e) => {
            tracing::warn!(error = %e, "treating unparsable travel date as far in the future");
            UNPARSABLE_LEAD_TIME
        }
    }
}

/// Whole days from the start of `now`'s UTC day to the travel date.
///
/// Used for the booking window, which compares against today's date rather
/// than the current time of day.
pub fn days_from_today(travel_date: &str, now: DateTime<Utc>) -> Result<i64, DateParseError> {
    let instant = parse_travel_instant(travel_date)?;
    let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    Ok(whole_days_between(today, instant))
}

/// Whether the travel date is strictly after `now`.
///
/// Unparsable dates are never upcoming.
pub fn is_upcoming(travel_date: &str, now: DateTime<Utc>) -> bool {
    parse_travel_instant(travel_date).is_ok_and(|instant| instant > now)
}
