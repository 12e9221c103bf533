//! Suggestion pipeline: enumerate, resolve, intersect, score, rank, persist.
//!
//! ```text
//! parent windows × profiles × profile windows (same day)
//!   → next occurrence per side (own timezone)
//!   → intersect → score → stable sort desc → top MAX_SUGGESTIONS
//! ```
//!
//! Each side's weekday is resolved against its own timezone's calendar, so
//! for zones separated by a date boundary "the same weekday" can land on two
//! different absolute dates. Such pairs simply fail to overlap.

use std::cmp::Reverse;

use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::error::Result;
use crate::occurrence::{next_occurrence, timezone_or_utc};
use crate::overlap::intersect;
use crate::preference::{PreferenceRecord, Suggestion};
use crate::profile::AvailabilityProfile;
use crate::score::{score, LocationPreference};
use crate::window::{normalize_windows, WeeklyWindow};

/// Upper bound on the number of suggestions returned and stored.
pub const MAX_SUGGESTIONS: usize = 3;

/// Timezone for a profile: its own zone, the parent's when it has none, UTC
/// when its zone id is unknown.
pub fn profile_timezone(profile: &AvailabilityProfile, parent_tz: Tz) -> Tz {
    match profile.timezone.as_deref().map(str::trim) {
        None | Some("") => parent_tz,
        Some(id) => timezone_or_utc(Some(id)),
    }
}

/// `None` when either time fails to parse or falls in a DST gap.
fn resolve_interval(
    tz: Tz,
    day: Weekday,
    window: &WeeklyWindow,
    now: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = next_occurrence(tz, day, window.start_time()?, now)?;
    let end = next_occurrence(tz, day, window.end_time()?, now)?;
    Some((start, end))
}

/// Every valid suggestion, in enumeration order: parent window, then profile,
/// then profile window.
pub fn collect_candidates(
    windows: &[WeeklyWindow],
    parent_tz: Tz,
    profiles: &[AvailabilityProfile],
    location: LocationPreference,
    now: DateTime<Utc>,
) -> Vec<Suggestion> {
    let mut candidates = Vec::new();

    for window in windows {
        let Some(day) = window.weekday() else {
            debug!(?window, "unknown day name, no profile window can match");
            continue;
        };
        let Some((parent_start, parent_end)) = resolve_interval(parent_tz, day, window, now) else {
            debug!(?window, "parent window has no resolvable occurrence");
            continue;
        };

        for profile in profiles {
            let tz = profile_timezone(profile, parent_tz);

            for slot in profile.windows_for(day) {
                let Some((profile_start, profile_end)) = resolve_interval(tz, day, &slot, now) else {
                    debug!(profile = %profile.name, ?slot, "profile window has no resolvable occurrence");
                    continue;
                };

                if let Some(overlap) = intersect(parent_start, parent_end, profile_start, profile_end) {
                    candidates.push(Suggestion {
                        start_time: overlap.start,
                        end_time: overlap.end,
                        confidence_score: score(&overlap, location),
                        source_profile: profile.name.clone(),
                    });
                }
            }
        }
    }

    candidates
}

/// Order by confidence, highest first, and keep at most [`MAX_SUGGESTIONS`].
///
/// `sort_by_key` is stable, so equal scores keep enumeration order.
pub fn rank(mut candidates: Vec<Suggestion>) -> Vec<Suggestion> {
    candidates.sort_by_key(|s| Reverse(s.confidence_score));
    candidates.truncate(MAX_SUGGESTIONS);
    candidates
}

/// Pure pipeline over already-normalized windows. No persistence.
pub fn suggest_windows(
    windows: &[WeeklyWindow],
    parent_timezone: Option<&str>,
    profiles: &[AvailabilityProfile],
    location: LocationPreference,
    now: DateTime<Utc>,
) -> Vec<Suggestion> {
    let parent_tz = timezone_or_utc(parent_timezone);
    rank(collect_candidates(windows, parent_tz, profiles, location, now))
}

/// Compute suggestions for `record` and overwrite its stored suggestions.
///
/// When the record has no complete windows or `profiles` is empty, returns an
/// empty list without touching the record. Otherwise the (possibly empty)
/// ranked list always replaces whatever was stored before.
///
/// # Errors
/// Only a failing [`PreferenceRecord::store_suggestions`] is surfaced.
pub fn generate_suggestions<R: PreferenceRecord + ?Sized>(
    record: &mut R,
    profiles: &[AvailabilityProfile],
    now: DateTime<Utc>,
) -> Result<Vec<Suggestion>> {
    let windows = normalize_windows(record.windows());
    if windows.is_empty() || profiles.is_empty() {
        debug!(
            windows = windows.len(),
            profiles = profiles.len(),
            "nothing to match, leaving record untouched"
        );
        return Ok(Vec::new());
    }

    let suggestions = suggest_windows(
        &windows,
        record.timezone(),
        profiles,
        record.location_preference(),
        now,
    );

    record.store_suggestions(&suggestions)?;
    info!(
        windows = windows.len(),
        profiles = profiles.len(),
        suggestions = suggestions.len(),
        "stored availability suggestions"
    );

    Ok(suggestions)
}

/// [`generate_suggestions`] against the system clock.
pub fn generate_suggestions_now<R: PreferenceRecord + ?Sized>(
    record: &mut R,
    profiles: &[AvailabilityProfile],
) -> Result<Vec<Suggestion>> {
    generate_suggestions(record, profiles, Utc::now())
}
