//! Recurring weekly windows and the fixed weekday table.
//!
//! Parent windows arrive loosely typed ([`RawWindow`]); [`normalize_windows`]
//! turns them into [`WeeklyWindow`] values, silently dropping entries with a
//! missing day, start or end.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Day names in index order: sunday = 0 … saturday = 6.
pub const DAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Weekdays in the same order as [`DAY_NAMES`].
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Index of `day` in the weekday table.
pub fn day_index(day: Weekday) -> usize {
    day.num_days_from_sunday() as usize
}

/// Lowercase table name for `day`.
pub fn day_name(day: Weekday) -> &'static str {
    DAY_NAMES[day_index(day)]
}

/// Look up a day name case-insensitively. Surrounding whitespace is ignored.
pub fn parse_day(name: &str) -> Option<Weekday> {
    let name = name.trim().to_lowercase();
    DAY_NAMES
        .iter()
        .position(|d| *d == name)
        .map(|idx| WEEKDAYS[idx])
}

const TIME_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

/// Parse a local time-of-day such as `"09:00"`, `"17:30:00"` or `"9:15 AM"`.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

/// A parent window exactly as stored on the preference record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(default, alias = "start_time", skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, alias = "end_time", skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl RawWindow {
    pub fn new(day: &str, start: &str, end: &str) -> Self {
        Self {
            day: Some(day.to_string()),
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }
}

/// A recurring weekly availability slot in some (externally known) timezone.
///
/// Fields stay as local strings; the day is lowercased. Parsing happens per
/// pairing during resolution, so a bad day or time only loses the pairings it
/// takes part in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyWindow {
    pub day: String,
    pub start: String,
    pub end: String,
}

impl WeeklyWindow {
    pub fn new(day: &str, start: &str, end: &str) -> Self {
        Self {
            day: day.trim().to_lowercase(),
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        }
    }

    /// `None` for an unknown day name.
    pub fn weekday(&self) -> Option<Weekday> {
        parse_day(&self.day)
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        parse_time_of_day(&self.start)
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        parse_time_of_day(&self.end)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}

/// Normalize raw parent windows, preserving order.
///
/// Entries missing a day, start or end are dropped without raising. Day names
/// are lowercased; values are not otherwise validated here.
pub fn normalize_windows(raw: &[RawWindow]) -> Vec<WeeklyWindow> {
    raw.iter()
        .filter_map(|w| match (present(&w.day), present(&w.start), present(&w.end)) {
            (Some(day), Some(start), Some(end)) => Some(WeeklyWindow::new(day, start, end)),
            _ => {
                debug!(window = ?w, "dropping parent window with missing fields");
                None
            }
        })
        .collect()
}
