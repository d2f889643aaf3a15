//! Minute-step awake timeline.
//!
//! A coarser, sampled view of the same question the calculator answers
//! exactly: walk the next 24 hours in fixed steps, mark which of the two
//! zones is awake at each sample, and pick out the first run of shared
//! awake time long enough to be worth planning around.

use chrono::{DateTime, Duration, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::OverlapWindow;
use crate::error::PolicyError;
use crate::policy::AwakePolicy;

/// Default sampling step for the scan, in minutes.
pub const DEFAULT_STEP_MIN: u32 = 15;

const MINUTES_PER_DAY: u32 = 1440;

/// One sample of the scanned day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub idx: usize,
    pub when: DateTime<Utc>,
    pub a_awake: bool,
    pub b_awake: bool,
    pub both: bool,
}

/// Whether `zone`'s local clock reads an awake hour at `at`.
///
/// Hour granularity: 07:59 local is asleep, 08:00 awake, under the default
/// policy.
pub fn is_awake(at: DateTime<Utc>, zone: Tz, policy: &AwakePolicy) -> bool {
    policy.contains_hour(at.with_timezone(&zone).hour())
}

/// Sample both zones' awake state every `step_min` minutes for 24 hours.
///
/// The scan starts at `base` truncated to the whole minute and produces
/// exactly `1440 / step_min` (integer division) entries.
///
/// # Errors
///
/// `PolicyError::InvalidStep` for a zero step or one longer than a day,
/// plus ordinary policy validation.
pub fn scan_timeline(
    base: DateTime<Utc>,
    zone_a: Tz,
    zone_b: Tz,
    step_min: u32,
    policy: &AwakePolicy,
) -> Result<Vec<TimelineEntry>, PolicyError> {
    policy.validate()?;
    if step_min == 0 || step_min > MINUTES_PER_DAY {
        return Err(PolicyError::InvalidStep(step_min));
    }

    let start = base
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(base);
    let steps = (MINUTES_PER_DAY / step_min) as usize;
    let mut entries = Vec::with_capacity(steps);
    for idx in 0..steps {
        let when = start + Duration::minutes(i64::from(step_min) * idx as i64);
        let a_awake = is_awake(when, zone_a, policy);
        let b_awake = is_awake(when, zone_b, policy);
        entries.push(TimelineEntry {
            idx,
            when,
            a_awake,
            b_awake,
            both: a_awake && b_awake,
        });
    }
    Ok(entries)
}

/// First run of shared awake samples at least `min_minutes` long.
///
/// A run's length is its sample count times the step; its end is the last
/// sample plus one step. A run still open when the scan ends qualifies on
/// the same terms, which also covers windows crossing into the next day.
/// Returns `None` when no run is long enough.
pub fn find_next_window(
    base: DateTime<Utc>,
    zone_a: Tz,
    zone_b: Tz,
    min_minutes: u32,
    step_min: u32,
    policy: &AwakePolicy,
) -> Result<Option<OverlapWindow>, PolicyError> {
    let timeline = scan_timeline(base, zone_a, zone_b, step_min, policy)?;
    let step = i64::from(step_min);

    let mut run_start: Option<usize> = None;
    for entry in &timeline {
        if entry.both {
            if run_start.is_none() {
                run_start = Some(entry.idx);
            }
        } else if let Some(first) = run_start.take() {
            let len = (entry.idx - first) as i64 * step;
            if len >= i64::from(min_minutes) {
                return Ok(Some(OverlapWindow {
                    start: timeline[first].when,
                    end: timeline[entry.idx - 1].when + Duration::minutes(step),
                }));
            }
        }
    }
    if let Some(first) = run_start {
        let len = (timeline.len() - first) as i64 * step;
        if len >= i64::from(min_minutes) {
            let last = timeline.len() - 1;
            return Ok(Some(OverlapWindow {
                start: timeline[first].when,
                end: timeline[last].when + Duration::minutes(step),
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn zone(id: &str) -> Tz {
        crate::zone::parse_zone(id).unwrap()
    }

    #[test]
    fn entry_count_follows_the_step() {
        let base = utc(2025, 1, 15, 0, 0, 0);
        let policy = AwakePolicy::default();
        let hourly = scan_timeline(base, Tz::UTC, Tz::UTC, 60, &policy).unwrap();
        assert_eq!(hourly.len(), 24);
        let quarter = scan_timeline(base, Tz::UTC, Tz::UTC, 15, &policy).unwrap();
        assert_eq!(quarter.len(), 96);
        // Indices are dense and samples step-spaced.
        for (i, entry) in quarter.iter().enumerate() {
            assert_eq!(entry.idx, i);
            assert_eq!(entry.when, base + Duration::minutes(15 * i as i64));
        }
    }

    #[test]
    fn base_is_truncated_to_the_minute() {
        let base = utc(2025, 1, 15, 10, 7, 31);
        let policy = AwakePolicy::default();
        let entries = scan_timeline(base, Tz::UTC, Tz::UTC, 60, &policy).unwrap();
        assert_eq!(entries[0].when, utc(2025, 1, 15, 10, 7, 0));
    }

    #[test]
    fn degenerate_steps_are_rejected() {
        let base = utc(2025, 1, 15, 0, 0, 0);
        let policy = AwakePolicy::default();
        assert_eq!(
            scan_timeline(base, Tz::UTC, Tz::UTC, 0, &policy).unwrap_err(),
            PolicyError::InvalidStep(0)
        );
        assert_eq!(
            scan_timeline(base, Tz::UTC, Tz::UTC, 1441, &policy).unwrap_err(),
            PolicyError::InvalidStep(1441)
        );
    }

    #[test]
    fn awake_check_uses_the_local_hour() {
        let policy = AwakePolicy::default();
        assert!(!is_awake(utc(2025, 1, 15, 7, 59, 0), Tz::UTC, &policy));
        assert!(is_awake(utc(2025, 1, 15, 8, 0, 0), Tz::UTC, &policy));
        assert!(is_awake(utc(2025, 1, 15, 23, 59, 0), Tz::UTC, &policy));
        assert!(!is_awake(utc(2025, 1, 15, 0, 0, 0), Tz::UTC, &policy));
        // 22:00Z is 09:00 in Sydney (+11 in January).
        assert!(is_awake(
            utc(2025, 1, 14, 22, 0, 0),
            zone("Australia/Sydney"),
            &policy
        ));
    }

    #[test]
    fn finds_the_days_shared_run() {
        let base = utc(2025, 1, 15, 0, 0, 0);
        let window = find_next_window(base, Tz::UTC, Tz::UTC, 45, DEFAULT_STEP_MIN, &AwakePolicy::default())
            .unwrap()
            .unwrap();
        // The run is still open at the end of the scan: it closes at the
        // final sample (23:45) plus one step.
        assert_eq!(window.start, utc(2025, 1, 15, 8, 0, 0));
        assert_eq!(window.end, utc(2025, 1, 16, 0, 0, 0));
    }

    #[test]
    fn short_runs_are_filtered_by_the_minimum() {
        // UTC vs Kolkata (+05:30) with awake hours 8-14: the only shared
        // samples are 08:00Z and 08:15Z, a 30-minute run.
        let base = utc(2025, 1, 15, 0, 0, 0);
        let policy = AwakePolicy::new(8, 14).unwrap();
        let kolkata = zone("Asia/Kolkata");

        let filtered =
            find_next_window(base, Tz::UTC, kolkata, 45, DEFAULT_STEP_MIN, &policy).unwrap();
        assert_eq!(filtered, None);

        let accepted = find_next_window(base, Tz::UTC, kolkata, 30, DEFAULT_STEP_MIN, &policy)
            .unwrap()
            .unwrap();
        assert_eq!(accepted.start, utc(2025, 1, 15, 8, 0, 0));
        assert_eq!(accepted.end, utc(2025, 1, 15, 8, 30, 0));
    }

    #[test]
    fn scan_agrees_with_the_calculator_on_shared_samples() {
        let base = utc(2025, 1, 15, 0, 0, 0);
        let policy = AwakePolicy::default();
        let a = zone("Australia/Sydney");
        let b = zone("America/Toronto");
        let entries = scan_timeline(base, a, b, 60, &policy).unwrap();
        let shared: Vec<u32> = entries
            .iter()
            .filter(|e| e.both)
            .map(|e| e.when.hour())
            .collect();
        // The calculator puts the window at [Jan 14 21:00Z, Jan 15 05:00Z);
        // scanning from 00:00Z sees its tail (00..05) and the next window's
        // head (21..24).
        assert_eq!(shared, vec![0, 1, 2, 3, 4, 21, 22, 23]);
    }
}
