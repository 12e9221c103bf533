//! The parent preference record and the suggestions written back onto it.
//!
//! The record is owned by an external persistence layer. The engine reads its
//! timezone, location preference and windows, and performs exactly one write:
//! a full overwrite of `suggested_windows`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::score::LocationPreference;
use crate::window::RawWindow;

/// A scored, concrete candidate appointment window.
///
/// Serializes as `{start_time, end_time, confidence_score, source_profile}` with
/// RFC 3339 UTC timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub confidence_score: i64,
    pub source_profile: String,
}

/// Read/write access to a stored parent preference.
///
/// Implementations backed by a database surface their write failures through
/// [`MatchError::Persistence`](crate::MatchError::Persistence).
pub trait PreferenceRecord {
    /// IANA zone id as stored. May be blank or unknown.
    fn timezone(&self) -> Option<&str>;

    fn location_preference(&self) -> LocationPreference;

    fn windows(&self) -> &[RawWindow];

    /// Replace any previously stored suggestions with `suggestions`.
    fn store_suggestions(&mut self, suggestions: &[Suggestion]) -> Result<()>;
}

/// In-memory preference record, also the JSON shape used by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentPreference {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub location_preference: Option<LocationPreference>,
    #[serde(default)]
    pub windows: Vec<RawWindow>,
    #[serde(default)]
    pub suggested_windows: Vec<Suggestion>,
}

impl ParentPreference {
    pub fn new(timezone: &str, location: LocationPreference, windows: Vec<RawWindow>) -> Self {
        Self {
            timezone: Some(timezone.to_string()),
            location_preference: Some(location),
            windows,
            suggested_windows: Vec::new(),
        }
    }
}

impl PreferenceRecord for ParentPreference {
    fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    fn location_preference(&self) -> LocationPreference {
        self.location_preference.unwrap_or_default()
    }

    fn windows(&self) -> &[RawWindow] {
        &self.windows
    }

    fn store_suggestions(&mut self, suggestions: &[Suggestion]) -> Result<()> {
        self.suggested_windows = suggestions.to_vec();
        Ok(())
    }
}
