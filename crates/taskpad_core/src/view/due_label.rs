//! Human-friendly due-date labels.
//!
//! Calendar comparisons run in the time zone of the supplied instants, so
//! callers pass both `due` and `now` in the user's zone.

use chrono::{DateTime, Datelike, Days, Local, TimeZone, Utc};
use std::fmt::Display;

const TIME_FORMAT: &str = "%I:%M %p";
const WEEKDAY_FORMAT: &str = "%a";
const FULL_DATE_FORMAT: &str = "%d %b %Y";

/// Formats `due` relative to `now`.
///
/// - same calendar day: `Today, 09:05 AM`
/// - next calendar day: `Tomorrow, 09:05 AM`
/// - same Monday-started week: `Fri, 09:05 AM`
/// - otherwise: `07 Mar 2027, 09:05 AM`
pub fn humanize_due<Tz>(due: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let time = due.format(TIME_FORMAT);
    let due_day = due.date_naive();
    let today = now.date_naive();

    if due_day == today {
        return format!("Today, {time}");
    }
    if today.checked_add_days(Days::new(1)) == Some(due_day) {
        return format!("Tomorrow, {time}");
    }

    let days_since_monday = u64::from(today.weekday().num_days_from_monday());
    let week_start = today.checked_sub_days(Days::new(days_since_monday));
    let week_end = week_start.and_then(|start| start.checked_add_days(Days::new(7)));
    if let (Some(start), Some(end)) = (week_start, week_end) {
        if due_day >= start && due_day < end {
            return format!("{}, {time}", due.format(WEEKDAY_FORMAT));
        }
    }

    format!("{}, {time}", due.format(FULL_DATE_FORMAT))
}

/// Formats a stored UTC instant in the host's local time zone.
pub fn humanize_due_local(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    humanize_due(&due.with_timezone(&Local), &now.with_timezone(&Local))
}
