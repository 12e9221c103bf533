//! Next-occurrence resolution for recurring weekly windows.
//!
//! Converts `(timezone, weekday, local time-of-day)` into the next concrete
//! instant of that weekday, strictly after today's date in that timezone.
//! "Today" comes from an explicit `now` so callers control the time reference.

use chrono::{DateTime, Datelike, Days, LocalResult, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use tracing::warn;

use crate::window::{day_index, parse_day, parse_time_of_day};

/// Parse an IANA timezone identifier. Blank or unknown ids yield `None`.
pub fn resolve_timezone(name: &str) -> Option<Tz> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    name.parse().ok()
}

/// Parse an IANA timezone identifier, falling back to UTC.
pub fn timezone_or_utc(name: Option<&str>) -> Tz {
    match name.map(str::trim) {
        None | Some("") => Tz::UTC,
        Some(id) => resolve_timezone(id).unwrap_or_else(|| {
            warn!(timezone = id, "unknown timezone, falling back to UTC");
            Tz::UTC
        }),
    }
}

/// Days from `today` until the next `target`, in `1..=7`.
///
/// A target equal to today maps to 7: the same weekday is always next week,
/// never later today.
pub fn days_until(today: Weekday, target: Weekday) -> u64 {
    let ahead = (day_index(target) + 7 - day_index(today)) % 7;
    if ahead == 0 {
        7
    } else {
        ahead as u64
    }
}

/// Resolve the next occurrence of `day` at local `time` in `tz`.
///
/// Returns `None` when the local time does not exist on that date (DST gap).
/// Ambiguous local times (DST fall-back) resolve to the earlier instant.
pub fn next_occurrence(
    tz: Tz,
    day: Weekday,
    time: NaiveTime,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let today = now.with_timezone(&tz).date_naive();
    let date = today.checked_add_days(Days::new(days_until(today.weekday(), day)))?;
    let local = date.and_time(time);

    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// String-typed form of [`next_occurrence`].
///
/// Fails (returns `None`) if the timezone, day name or time-of-day cannot be
/// parsed. There is no UTC fallback here; callers that want one resolve the
/// zone themselves via [`timezone_or_utc`].
pub fn resolve(
    timezone: &str,
    day_of_week: &str,
    time_of_day: &str,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let tz = resolve_timezone(timezone)?;
    let day = parse_day(day_of_week)?;
    let time = parse_time_of_day(time_of_day)?;
    next_occurrence(tz, day, time, now)
}
