//! Property-based tests for the suggestion pipeline using proptest.
//!
//! These hold for any combination of windows, profiles, timezones and clock.

use availability_match::occurrence::resolve;
use availability_match::window::DAY_NAMES;
use availability_match::{
    generate_suggestions, AvailabilityProfile, LocationPreference, ParentPreference, RawWindow,
    MAX_SUGGESTIONS,
};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_timezone() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("UTC".to_string()),
        Just("America/New_York".to_string()),
        Just("America/Los_Angeles".to_string()),
        Just("Europe/London".to_string()),
        Just("Asia/Tokyo".to_string()),
        Just("Australia/Sydney".to_string()),
    ]
}

fn arb_day() -> impl Strategy<Value = String> {
    (0usize..7).prop_map(|i| DAY_NAMES[i].to_string())
}

fn hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// `(start, end)` local times, 15 minutes to 10 hours long, within one day.
fn arb_range() -> impl Strategy<Value = (String, String)> {
    (0u32..1380, 15u32..=600).prop_map(|(start, len)| {
        let end = (start + len).min(1439);
        (hhmm(start), hhmm(end))
    })
}

fn arb_raw_window() -> impl Strategy<Value = RawWindow> {
    (arb_day(), arb_range()).prop_map(|(day, (start, end))| RawWindow::new(&day, &start, &end))
}

fn arb_profile() -> impl Strategy<Value = AvailabilityProfile> {
    (
        "[A-Z][a-z]{2,8}",
        prop::option::of(arb_timezone()),
        prop::collection::vec((arb_day(), arb_range()), 0..6),
    )
        .prop_map(|(name, tz, ranges)| {
            ranges
                .into_iter()
                .fold(AvailabilityProfile::new(&name, tz.as_deref()), |p, (day, (s, e))| {
                    p.with_window(&day, &s, &e)
                })
        })
}

fn arb_location() -> impl Strategy<Value = LocationPreference> {
    prop_oneof![
        Just(LocationPreference::InPerson),
        Just(LocationPreference::Telehealth),
        Just(LocationPreference::Either),
        Just(LocationPreference::Unspecified),
    ]
}

/// Any instant in 2025-2027.
fn arb_now() -> impl Strategy<Value = DateTime<Utc>> {
    (1_735_689_600i64..1_830_297_600).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Output shape: bounded, valid intervals, descending scores
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn output_is_bounded_valid_and_descending(
        tz in arb_timezone(),
        location in arb_location(),
        windows in prop::collection::vec(arb_raw_window(), 0..5),
        profiles in prop::collection::vec(arb_profile(), 0..5),
        now in arb_now(),
    ) {
        let mut pref = ParentPreference::new(&tz, location, windows);
        let result = generate_suggestions(&mut pref, &profiles, now).unwrap();

        prop_assert!(result.len() <= MAX_SUGGESTIONS);
        for s in &result {
            prop_assert!(s.start_time < s.end_time, "invalid interval: {:?}", s);
            prop_assert!(s.confidence_score >= 0);
            prop_assert!(s.start_time > now, "suggestion in the past: {:?}", s);
        }
        for pair in result.windows(2) {
            prop_assert!(
                pair[0].confidence_score >= pair[1].confidence_score,
                "scores not descending: {} < {}",
                pair[0].confidence_score,
                pair[1].confidence_score
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Determinism: same inputs + same clock → same ordered result
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn identical_runs_agree(
        tz in arb_timezone(),
        location in arb_location(),
        windows in prop::collection::vec(arb_raw_window(), 0..5),
        profiles in prop::collection::vec(arb_profile(), 0..5),
        now in arb_now(),
    ) {
        let mut a = ParentPreference::new(&tz, location, windows.clone());
        let mut b = ParentPreference::new(&tz, location, windows);

        let first = generate_suggestions(&mut a, &profiles, now).unwrap();
        let second = generate_suggestions(&mut b, &profiles, now).unwrap();

        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Empty inputs never touch the record
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn empty_inputs_leave_record_untouched(
        tz in arb_timezone(),
        windows in prop::collection::vec(arb_raw_window(), 0..3),
        profiles in prop::collection::vec(arb_profile(), 0..3),
        now in arb_now(),
    ) {
        prop_assume!(windows.is_empty() || profiles.is_empty());

        let mut pref = ParentPreference::new(&tz, LocationPreference::Either, windows);
        let before = pref.clone();
        let result = generate_suggestions(&mut pref, &profiles, now).unwrap();

        prop_assert!(result.is_empty());
        prop_assert_eq!(pref, before);
    }
}

// ---------------------------------------------------------------------------
// A profile window outside the parent window contributes nothing
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn disjoint_windows_never_match(
        tz in arb_timezone(),
        day in arb_day(),
        split in 60u32..1380,
        now in arb_now(),
    ) {
        // Parent before `split`, profile from `split` onwards, same zone.
        let mut pref = ParentPreference::new(
            &tz,
            LocationPreference::Either,
            vec![RawWindow::new(&day, &hhmm(split - 60), &hhmm(split))],
        );
        let profile = AvailabilityProfile::new("After", Some(tz.as_str()))
            .with_window(&day, &hhmm(split), "23:59");

        let result = generate_suggestions(&mut pref, &[profile], now).unwrap();

        prop_assert!(result.is_empty(), "unexpected match: {:?}", result);
    }
}

// ---------------------------------------------------------------------------
// Resolution is always 1-7 days ahead, never today
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn occurrence_is_never_today(
        tz in arb_timezone(),
        day in arb_day(),
        (start, _) in arb_range(),
        now in arb_now(),
    ) {
        let zone: Tz = tz.parse().unwrap();
        if let Some(at) = resolve(&tz, &day, &start, now) {
            let today = now.with_timezone(&zone).date_naive();
            let date = at.with_timezone(&zone).date_naive();
            let ahead = (date - today).num_days();

            prop_assert!((1..=7).contains(&ahead), "{} days ahead", ahead);
            prop_assert_eq!(
                date.weekday().num_days_from_sunday() as usize,
                DAY_NAMES.iter().position(|d| *d == day).unwrap()
            );
        }
    }
}
