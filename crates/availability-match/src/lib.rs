//! # availability-match
//!
//! Matches a parent's recurring weekly availability against provider/program
//! availability profiles and proposes a short, ranked list of concrete
//! appointment windows.
//!
//! Each side of a comparison lives in its own IANA timezone. Weekly windows are
//! resolved to their next concrete occurrence, intersected as absolute UTC
//! intervals, scored, and the best few are written back onto the preference
//! record. Nothing here books anything or checks existing appointments.
//!
//! ## Modules
//!
//! - [`window`] — weekday table, time-of-day parsing, parent window normalization
//! - [`occurrence`] — weekday + local time → next absolute instant
//! - [`overlap`] — intersection of two absolute intervals
//! - [`score`] — confidence scoring and location preference
//! - [`profile`] — provider availability profiles and their JSON source
//! - [`preference`] — the preference record seam and the `Suggestion` value
//! - [`suggest`] — enumerate, rank, truncate and persist
//! - [`error`] — Error types

pub mod error;
pub mod occurrence;
pub mod overlap;
pub mod preference;
pub mod profile;
pub mod score;
pub mod suggest;
pub mod window;

pub use error::MatchError;
pub use occurrence::{next_occurrence, resolve};
pub use overlap::{intersect, Overlap};
pub use preference::{ParentPreference, PreferenceRecord, Suggestion};
pub use profile::{load_profiles, parse_profiles, AvailabilityProfile, TimeRange};
pub use score::{score, LocationPreference};
pub use suggest::{generate_suggestions, generate_suggestions_now, suggest_windows, MAX_SUGGESTIONS};
pub use window::{normalize_windows, RawWindow, WeeklyWindow};
