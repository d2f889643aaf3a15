//! Fixed-target countdown.
//!
//! Days/hours/minutes/seconds until a shared target instant, clamped at
//! zero once the target has passed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;

/// Decomposed time remaining until a target instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub mins: i64,
    pub secs: i64,
}

impl Countdown {
    /// Remaining time from `now` to `target`.
    ///
    /// Once the target passes, every component is zero; components are
    /// never negative.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = (target - now).num_seconds().max(0);
        Self {
            days: total / SECS_PER_DAY,
            hours: total % SECS_PER_DAY / SECS_PER_HOUR,
            mins: total % SECS_PER_HOUR / 60,
            secs: total % 60,
        }
    }

    /// Whether the target has been reached.
    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.mins == 0 && self.secs == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn decomposes_the_remaining_time() {
        let now = utc(2025, 1, 15, 12, 0, 0);
        let target = utc(2025, 3, 1, 14, 30, 45);
        let cd = Countdown::until(target, now);
        assert_eq!(
            cd,
            Countdown {
                days: 45,
                hours: 2,
                mins: 30,
                secs: 45
            }
        );
        assert!(!cd.is_zero());
    }

    #[test]
    fn sub_day_remainders() {
        let now = utc(2025, 1, 15, 12, 0, 0);
        let cd = Countdown::until(utc(2025, 1, 15, 12, 0, 59), now);
        assert_eq!(
            cd,
            Countdown {
                days: 0,
                hours: 0,
                mins: 0,
                secs: 59
            }
        );
    }

    #[test]
    fn clamps_at_zero_after_the_target() {
        let now = utc(2025, 1, 15, 12, 0, 0);
        let past = utc(2024, 12, 25, 0, 0, 0);
        let cd = Countdown::until(past, now);
        assert_eq!(cd, Countdown::default());
        assert!(cd.is_zero());
        // Exactly at the target also reads zero.
        assert!(Countdown::until(now, now).is_zero());
    }
}
