//! Intersection of two absolute intervals.
//!
//! Both sides are already resolved to UTC instants, each from its own timezone.
//! Touching intervals (one ends exactly when the other starts) do not overlap.

use chrono::{DateTime, Utc};

/// The shared part of a parent interval and a profile interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Whole minutes, rounded down.
    pub duration_minutes: i64,
}

/// Intersect `[parent_start, parent_end]` with `[profile_start, profile_end]`.
///
/// The overlap is `[max(starts), min(ends)]` and is only returned when its start
/// is strictly before its end. An inverted input interval therefore never
/// produces an overlap.
pub fn intersect(
    parent_start: DateTime<Utc>,
    parent_end: DateTime<Utc>,
    profile_start: DateTime<Utc>,
    profile_end: DateTime<Utc>,
) -> Option<Overlap> {
    let start = parent_start.max(profile_start);
    let end = parent_end.min(profile_end);
    if start >= end {
        return None;
    }

    Some(Overlap {
        start,
        end,
        duration_minutes: (end - start).num_seconds().div_euclid(60),
    })
}
