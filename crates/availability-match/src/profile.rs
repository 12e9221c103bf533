//! Provider/program availability profiles.
//!
//! Profiles come from an external configuration file and are read-only here.
//! A missing or unreadable source is treated as "no profiles".

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::window::{day_name, WeeklyWindow};

/// A local `{start, end}` pair inside a profile's day schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl TimeRange {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// A named provider's recurring weekly availability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityProfile {
    pub name: String,
    /// IANA zone id. `None` means "same as the parent".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Day name → ordered local ranges. Keys are matched case-insensitively.
    #[serde(default)]
    pub windows: BTreeMap<String, Vec<TimeRange>>,
}

impl AvailabilityProfile {
    pub fn new(name: &str, timezone: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            timezone: timezone.map(str::to_string),
            windows: BTreeMap::new(),
        }
    }

    /// Builder-style helper that appends a range to `day`.
    pub fn with_window(mut self, day: &str, start: &str, end: &str) -> Self {
        self.windows
            .entry(day.to_lowercase())
            .or_default()
            .push(TimeRange::new(start, end));
        self
    }

    /// Ranges listed for `day`, in file order.
    pub fn ranges_for(&self, day: Weekday) -> impl Iterator<Item = &TimeRange> {
        let name = day_name(day);
        self.windows
            .iter()
            .filter(move |(key, _)| key.trim().eq_ignore_ascii_case(name))
            .flat_map(|(_, ranges)| ranges.iter())
    }

    /// Windows for `day`, in file order. Times are not validated here.
    pub fn windows_for(&self, day: Weekday) -> Vec<WeeklyWindow> {
        self.ranges_for(day)
            .map(|range| WeeklyWindow::new(day_name(day), &range.start, &range.end))
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileDocument {
    List(Vec<AvailabilityProfile>),
    Wrapped { profiles: Vec<AvailabilityProfile> },
}

/// Parse profiles from JSON: either a bare array or `{"profiles": [...]}`.
pub fn parse_profiles(json: &str) -> Result<Vec<AvailabilityProfile>> {
    let doc: ProfileDocument = serde_json::from_str(json)?;
    Ok(match doc {
        ProfileDocument::List(profiles) => profiles,
        ProfileDocument::Wrapped { profiles } => profiles,
    })
}

fn read_profiles(path: &Path) -> Result<Vec<AvailabilityProfile>> {
    let json = std::fs::read_to_string(path)?;
    parse_profiles(&json)
}

/// Load profiles from a JSON file, degrading to an empty list on any failure.
pub fn load_profiles(path: impl AsRef<Path>) -> Vec<AvailabilityProfile> {
    let path = path.as_ref();
    match read_profiles(path) {
        Ok(profiles) => {
            debug!(path = %path.display(), count = profiles.len(), "loaded availability profiles");
            profiles
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "availability profiles unavailable, using none");
            Vec::new()
        }
    }
}
