//! Wall-clock helpers shared by the session model and the transcript printer.

use chrono::{DateTime, Datelike, Duration, Local, TimeZone, Utc};

/// Current time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render an epoch-millis timestamp relative to `now`.
///
/// Today and yesterday get a clock time ("Today at 10:30"); older dates get a
/// short month/day, with the year only when it differs from `now`'s.
pub fn format_timestamp<Tz: TimeZone>(millis: i64, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let tz = now.timezone();
    let Some(date) = tz.timestamp_millis_opt(millis).single() else {
        return "Unknown date".to_string();
    };

    let today = now.date_naive();
    let day = date.date_naive();
    let time = date.format("%H:%M");

    if day == today {
        return format!("Today at {time}");
    }
    if today
        .checked_sub_signed(Duration::days(1))
        .is_some_and(|yesterday| yesterday == day)
    {
        return format!("Yesterday at {time}");
    }

    if date.year() == now.year() {
        date.format("%b %-d").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// [`format_timestamp`] against the local clock.
pub fn format_local_timestamp(millis: i64) -> String {
    format_timestamp(millis, &Local::now())
}
