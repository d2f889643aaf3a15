//! Awake-overlap calculator.
//!
//! Given two IANA zones, a reference instant, and an awake policy, this
//! module finds the current or next interval in which both parties are
//! simultaneously awake:
//!
//! - Each zone's awake interval is anchored on that zone's local midnight
//!   (DST-corrected), as absolute UTC instants
//! - The two intervals are intersected; a non-empty intersection that has
//!   not yet ended is the answer
//! - Otherwise the interval that ends first is re-anchored on its zone's
//!   next calendar date and the intersection is retried
//!
//! The calculator is a pure function of its inputs. Callers that want the
//! "live" reading pass the current instant (see [`crate::watch`]).

mod timeline;

pub use timeline::{
    find_next_window, is_awake, scan_timeline, TimelineEntry, DEFAULT_STEP_MIN,
};

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::policy::AwakePolicy;
use crate::zone::{local_date, local_midnight, WallClock};

/// Anchor re-tries before concluding the awake windows never meet.
///
/// Initial anchors can be misaligned by up to two calendar days across the
/// date line; each retry advances one zone by one day.
const MAX_ANCHOR_ADVANCES: u32 = 6;

/// Position of the reported window relative to the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapStatus {
    /// The reference instant lies inside the window.
    Current,
    /// The window has not opened yet.
    Next,
}

/// A half-open interval `[start, end)` in absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl OverlapWindow {
    /// Length of the window in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether `at` falls inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

/// Hours and minutes until a window opens. Zero when it is already open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub hours: i64,
    pub minutes: i64,
}

impl TimeRemaining {
    /// Time from `now` until `start`, floored at zero.
    pub fn until(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = (start - now).num_minutes().max(0);
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }
}

/// Calculator result: the window, its classification, and both local views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapReport {
    pub status: OverlapStatus,
    pub window: OverlapWindow,
    /// Window endpoints on the first zone's clock.
    pub start_local_a: WallClock,
    pub end_local_a: WallClock,
    /// Window endpoints on the second zone's clock.
    pub start_local_b: WallClock,
    pub end_local_b: WallClock,
    /// Until the window opens; zero while it is open.
    pub time_remaining: TimeRemaining,
}

/// Awake interval of `zone` on its local `date`, as absolute instants.
///
/// Hours are added as fixed durations on top of the anchored midnight, so a
/// DST jump inside the day shifts the local labels, not the instants.
fn awake_interval(
    date: chrono::NaiveDate,
    zone: Tz,
    policy: &AwakePolicy,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let midnight = local_midnight(date, zone)?;
    Ok((
        midnight + Duration::hours(i64::from(policy.start_hour)),
        midnight + Duration::hours(i64::from(policy.end_hour)),
    ))
}

/// Find the current or next interval in which both zones are awake.
///
/// # Arguments
///
/// * `zone_a`, `zone_b` - the two parties' zones (the same zone is valid)
/// * `now` - reference instant; the result is deterministic in it
/// * `policy` - shared awake-hour bounds
///
/// # Returns
///
/// `Ok(Some(report))` with status `Current` or `Next`. `Ok(None)` only when
/// the two daily awake windows never intersect, which requires a custom
/// policy spanning half the day or less; the default policy always yields a
/// window.
///
/// # Errors
///
/// Policy validation failures and unresolvable local midnights.
pub fn compute_overlap(
    zone_a: Tz,
    zone_b: Tz,
    now: DateTime<Utc>,
    policy: &AwakePolicy,
) -> Result<Option<OverlapReport>> {
    policy.validate()?;

    let mut date_a = local_date(now, zone_a);
    let mut date_b = local_date(now, zone_b);
    let mut a = awake_interval(date_a, zone_a, policy)?;
    let mut b = awake_interval(date_b, zone_b, policy)?;

    for _ in 0..MAX_ANCHOR_ADVANCES {
        let start = a.0.max(b.0);
        let end = a.1.min(b.1);
        if start < end && now < end {
            let status = if now >= start {
                OverlapStatus::Current
            } else {
                OverlapStatus::Next
            };
            return Ok(Some(OverlapReport {
                status,
                window: OverlapWindow { start, end },
                start_local_a: WallClock::of(start, zone_a),
                end_local_a: WallClock::of(end, zone_a),
                start_local_b: WallClock::of(start, zone_b),
                end_local_b: WallClock::of(end, zone_b),
                time_remaining: TimeRemaining::until(start, now),
            }));
        }
        // No qualifying window under this anchoring. Re-anchor the interval
        // that ends first onto its zone's next calendar date.
        if a.1 <= b.1 {
            date_a = date_a + Duration::days(1);
            a = awake_interval(date_a, zone_a, policy)?;
        } else {
            date_b = date_b + Duration::days(1);
            b = awake_interval(date_b, zone_b, policy)?;
        }
    }

    Ok(None)
}
