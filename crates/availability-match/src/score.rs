//! Confidence scoring for candidate overlaps.

use serde::{Deserialize, Serialize};

use crate::overlap::Overlap;

/// Bonus added when the parent accepts either in-person or telehealth visits.
pub const FLEXIBLE_LOCATION_BONUS: i64 = 5;

/// Where the parent is willing to attend appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPreference {
    InPerson,
    #[serde(alias = "virtual", alias = "remote")]
    Telehealth,
    Either,
    /// Missing or unrecognized value.
    #[default]
    #[serde(other)]
    Unspecified,
}

impl LocationPreference {
    pub fn is_flexible(self) -> bool {
        self == LocationPreference::Either
    }
}

/// Score an overlap: its length in minutes, plus [`FLEXIBLE_LOCATION_BONUS`]
/// when the location preference is [`LocationPreference::Either`].
///
/// Nothing else (profile priority, proximity, recency) is considered.
pub fn score(overlap: &Overlap, location: LocationPreference) -> i64 {
    let bonus = if location.is_flexible() {
        FLEXIBLE_LOCATION_BONUS
    } else {
        0
    };
    overlap.duration_minutes + bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn overlap(minutes: i64) -> Overlap {
        let start = Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap();
        Overlap {
            start,
            end: start + chrono::Duration::minutes(minutes),
            duration_minutes: minutes,
        }
    }

    #[test]
    fn duration_only_without_flexibility() {
        assert_eq!(score(&overlap(60), LocationPreference::InPerson), 60);
        assert_eq!(score(&overlap(60), LocationPreference::Telehealth), 60);
        assert_eq!(score(&overlap(60), LocationPreference::Unspecified), 60);
    }

    #[test]
    fn either_earns_bonus() {
        assert_eq!(score(&overlap(60), LocationPreference::Either), 65);
    }

    #[test]
    fn unknown_location_strings_deserialize_as_unspecified() {
        let loc: LocationPreference = serde_json::from_str(r#""home_visit""#).unwrap();
        assert_eq!(loc, LocationPreference::Unspecified);
        let loc: LocationPreference = serde_json::from_str(r#""either""#).unwrap();
        assert_eq!(loc, LocationPreference::Either);
        let loc: LocationPreference = serde_json::from_str(r#""virtual""#).unwrap();
        assert_eq!(loc, LocationPreference::Telehealth);
    }
}
