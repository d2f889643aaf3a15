//! Integration tests for the awake-overlap calculator.
//!
//! These exercise the public API end to end: zone resolution, midnight
//! anchoring across DST transitions, window classification, the timeline
//! scan, and the calculator's properties under arbitrary instants.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use cowake_core::{
    compute_overlap, find_next_window, parse_zone, scan_timeline, AwakePolicy, OverlapStatus,
    TimeRemaining, WallClock,
};
use proptest::prelude::*;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

fn zone(id: &str) -> Tz {
    parse_zone(id).unwrap()
}

#[test]
fn test_same_zone_reports_the_full_awake_window() {
    let report = compute_overlap(
        zone("UTC"),
        zone("UTC"),
        utc(2025, 1, 15, 12, 0, 0),
        &AwakePolicy::default(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(report.status, OverlapStatus::Current);
    assert_eq!(report.window.start, utc(2025, 1, 15, 8, 0, 0));
    assert_eq!(report.window.end, utc(2025, 1, 16, 0, 0, 0));
    assert_eq!(report.window.duration_minutes(), 16 * 60);
    assert_eq!(report.start_local_a, WallClock { hour: 8, minute: 0 });
    assert_eq!(report.end_local_b, WallClock { hour: 0, minute: 0 });
}

#[test]
fn test_sydney_toronto_share_eight_hours_in_january() {
    // Sixteen zones apart, yet two 16-hour days must share 8 hours:
    // Sydney's morning is Toronto's evening.
    let report = compute_overlap(
        zone("Australia/Sydney"),
        zone("America/Toronto"),
        utc(2025, 1, 15, 0, 0, 0),
        &AwakePolicy::default(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(report.status, OverlapStatus::Current);
    assert_eq!(report.window.start, utc(2025, 1, 14, 21, 0, 0));
    assert_eq!(report.window.end, utc(2025, 1, 15, 5, 0, 0));
    assert_eq!(report.window.duration_minutes(), 8 * 60);
    assert_eq!(report.start_local_a, WallClock { hour: 8, minute: 0 });
    assert_eq!(report.end_local_a, WallClock { hour: 16, minute: 0 });
    assert_eq!(report.start_local_b, WallClock { hour: 16, minute: 0 });
    assert_eq!(report.end_local_b, WallClock { hour: 0, minute: 0 });
    assert!(report.time_remaining.is_zero());
}

#[test]
fn test_gap_between_windows_classifies_as_next() {
    // 06:00Z sits in the daily gap: the previous shared window closed at
    // 05:00Z and the next opens at 21:00Z, which needs Sydney re-anchored
    // onto its next calendar day.
    let report = compute_overlap(
        zone("Australia/Sydney"),
        zone("America/Toronto"),
        utc(2025, 1, 15, 6, 0, 0),
        &AwakePolicy::default(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(report.status, OverlapStatus::Next);
    assert_eq!(report.window.start, utc(2025, 1, 15, 21, 0, 0));
    assert_eq!(report.window.end, utc(2025, 1, 16, 5, 0, 0));
    assert_eq!(
        report.time_remaining,
        TimeRemaining {
            hours: 15,
            minutes: 0
        }
    );
}

#[test]
fn test_unknown_zone_is_an_error_not_a_fallback() {
    assert!(parse_zone("America/Atlantis").is_err());
    assert!(parse_zone("sydney").is_err());
}

#[test]
fn test_fall_back_night_keeps_the_window_anchored() {
    // New York leaves DST at 02:00 on 2025-11-02. That date's midnight is
    // still EDT, so the awake window runs [04:00Z + 8h, 04:00Z + 24h): the
    // absolute interval is unaffected by the extra local hour.
    let report = compute_overlap(
        zone("America/New_York"),
        zone("Europe/London"),
        utc(2025, 11, 2, 12, 0, 0),
        &AwakePolicy::default(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(report.status, OverlapStatus::Current);
    assert_eq!(report.window.start, utc(2025, 11, 2, 12, 0, 0));
    assert_eq!(report.window.end, utc(2025, 11, 3, 0, 0, 0));
    // The start instant reads 07:00 EST: the repeated hour pushed local
    // labels back while the anchor stayed put.
    assert_eq!(report.start_local_a, WallClock { hour: 7, minute: 0 });
    assert_eq!(report.start_local_b, WallClock { hour: 12, minute: 0 });
}

#[test]
fn test_spring_forward_midnight_still_computes() {
    // Santiago's clocks jump from 00:00 to 01:00 on 2024-09-08; midnight
    // anchoring falls back to the first valid local time.
    let report = compute_overlap(
        zone("America/Santiago"),
        zone("UTC"),
        utc(2024, 9, 8, 12, 0, 0),
        &AwakePolicy::default(),
    )
    .unwrap()
    .unwrap();

    assert!(report.window.start < report.window.end);
    assert_eq!(report.status, OverlapStatus::Current);
    assert!(report.window.contains(utc(2024, 9, 8, 12, 0, 0)));
}

#[test]
fn test_timeline_entry_counts_follow_the_step() {
    let base = utc(2025, 1, 15, 0, 0, 0);
    let policy = AwakePolicy::default();
    let a = zone("Australia/Sydney");
    let b = zone("America/Toronto");
    assert_eq!(scan_timeline(base, a, b, 60, &policy).unwrap().len(), 24);
    assert_eq!(scan_timeline(base, a, b, 15, &policy).unwrap().len(), 96);
}

#[test]
fn test_min_duration_filter_rejects_short_overlaps() {
    // With awake hours 8-14, UTC and Kolkata share exactly 30 minutes a
    // day; a 45-minute minimum filters it out entirely.
    let policy = AwakePolicy::new(8, 14).unwrap();
    let found = find_next_window(
        utc(2025, 1, 15, 0, 0, 0),
        zone("UTC"),
        zone("Asia/Kolkata"),
        45,
        15,
        &policy,
    )
    .unwrap();
    assert_eq!(found, None);
}

#[test]
fn test_scan_and_calculator_agree_on_the_same_zone() {
    let base = utc(2025, 1, 15, 0, 0, 0);
    let policy = AwakePolicy::default();
    let window = find_next_window(base, zone("UTC"), zone("UTC"), 45, 15, &policy)
        .unwrap()
        .unwrap();
    let report = compute_overlap(zone("UTC"), zone("UTC"), base, &policy)
        .unwrap()
        .unwrap();
    assert_eq!(window.start, report.window.start);
    assert_eq!(window.end, report.window.end);
}

const ZONES: &[&str] = &[
    "UTC",
    "Australia/Sydney",
    "America/Toronto",
    "Europe/Berlin",
    "Asia/Kolkata",
    "Asia/Kathmandu",
    "Pacific/Auckland",
    "America/Los_Angeles",
    "America/Sao_Paulo",
    "Africa/Nairobi",
];

// 2024-01-01T00:00:00Z; the 4-year span crosses many DST transitions.
const PROP_EPOCH: i64 = 1_704_067_200;

proptest! {
    #[test]
    fn prop_default_policy_always_yields_a_classified_window(
        a_idx in 0..ZONES.len(),
        b_idx in 0..ZONES.len(),
        offset_secs in 0i64..(4 * 365 * 86_400),
    ) {
        let a = parse_zone(ZONES[a_idx]).unwrap();
        let b = parse_zone(ZONES[b_idx]).unwrap();
        let now = Utc.timestamp_opt(PROP_EPOCH + offset_secs, 0).unwrap();
        let policy = AwakePolicy::default();

        let report = compute_overlap(a, b, now, &policy)
            .unwrap()
            .expect("16-hour awake windows always intersect");

        prop_assert!(report.window.start < report.window.end);
        match report.status {
            OverlapStatus::Current => {
                prop_assert!(report.window.contains(now));
                prop_assert!(report.time_remaining.is_zero());
            }
            OverlapStatus::Next => prop_assert!(now < report.window.start),
        }

        let again = compute_overlap(a, b, now, &policy).unwrap().unwrap();
        prop_assert_eq!(report, again);
    }

    #[test]
    fn prop_same_zone_window_spans_the_policy_exactly(
        idx in 0..ZONES.len(),
        offset_secs in 0i64..(2 * 365 * 86_400),
    ) {
        let z = parse_zone(ZONES[idx]).unwrap();
        let now = Utc.timestamp_opt(PROP_EPOCH + offset_secs, 0).unwrap();
        let report = compute_overlap(z, z, now, &AwakePolicy::default())
            .unwrap()
            .unwrap();
        // Absolute length never varies, even when a DST jump relabels the
        // local endpoints.
        prop_assert_eq!(report.window.duration_minutes(), 16 * 60);
    }
}
