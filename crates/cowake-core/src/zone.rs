//! IANA timezone projection and local-midnight anchoring.
//!
//! All interval arithmetic in the overlap calculator is done on absolute
//! instants; this module is the only place local wall-clock time is
//! produced or consumed. Zone identifiers are resolved strictly: an
//! unknown identifier is an error, never a fallback zone.

use std::fmt;

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::TimeZoneError;

/// Resolve an IANA timezone identifier against the bundled zone database.
///
/// # Errors
///
/// Returns `TimeZoneError::Unrecognized` for identifiers the database does
/// not know. The caller decides how to recover; no default zone is
/// substituted here.
pub fn parse_zone(id: &str) -> Result<Tz, TimeZoneError> {
    id.parse::<Tz>()
        .map_err(|_| TimeZoneError::Unrecognized(id.to_string()))
}

/// An hour/minute pair on some zone's local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallClock {
    pub hour: u32,
    pub minute: u32,
}

impl WallClock {
    /// Project an instant onto `zone`'s local clock.
    pub fn of(instant: DateTime<Utc>, zone: Tz) -> Self {
        let local = instant.with_timezone(&zone);
        Self {
            hour: local.hour(),
            minute: local.minute(),
        }
    }

    /// Minutes elapsed since local midnight.
    pub fn minutes_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Same reading with the minutes dropped, for coarse display.
    pub fn truncated_to_hour(&self) -> Self {
        Self {
            hour: self.hour,
            minute: 0,
        }
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Calendar date of `instant` on `zone`'s local clock.
pub fn local_date(instant: DateTime<Utc>, zone: Tz) -> NaiveDate {
    instant.with_timezone(&zone).date_naive()
}

/// Absolute instant of `date`'s local midnight in `zone`.
///
/// Civil midnight is not guaranteed to exist once: a spring-forward jump
/// can skip it and a fall-back jump can duplicate it. Duplicated midnight
/// resolves to the earliest instant. Skipped midnight is retried one hour
/// later, the size of every gap in the zone database.
///
/// # Errors
///
/// Returns `TimeZoneError::Unresolvable` if the corrected time still does
/// not map onto the zone's timeline.
pub fn local_midnight(date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>, TimeZoneError> {
    let naive = date.and_time(NaiveTime::MIN);
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            match zone.from_local_datetime(&shifted) {
                LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
                LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
                LocalResult::None => Err(TimeZoneError::Unresolvable {
                    zone: zone.name().to_string(),
                    naive,
                }),
            }
        }
    }
}

/// UTC offset of `zone` at `instant`, in minutes.
///
/// Taken from the zone database at that exact instant, so DST transitions
/// and non-whole-hour offsets are reflected.
pub fn offset_minutes(instant: DateTime<Utc>, zone: Tz) -> i32 {
    instant
        .with_timezone(&zone)
        .offset()
        .fix()
        .local_minus_utc()
        / 60
}

/// Signed clock difference `b - a` in hours at `instant`.
///
/// Fractional for zones on half-hour or 45-minute offsets.
pub fn zone_diff_hours(a: Tz, b: Tz, at: DateTime<Utc>) -> f64 {
    f64::from(offset_minutes(at, b) - offset_minutes(at, a)) / 60.0
}
