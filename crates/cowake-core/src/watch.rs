//! Tick-driven recomputation of the overlap report.
//!
//! The calculator is a pure function of its inputs; this module owns the
//! cadence. A ticker asks its [`Clock`] for the instant, recomputes, and
//! hands the result to a [`ReportSink`]. The calculator never learns that
//! a loop exists.

use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::Result;
use crate::overlap::{compute_overlap, OverlapReport};
use crate::policy::AwakePolicy;
use crate::zone::WallClock;

/// Snapshot produced on each tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchUpdate {
    /// Instant the snapshot was computed at.
    pub at: DateTime<Utc>,
    /// Both parties' local clocks at that instant.
    pub local_a: WallClock,
    pub local_b: WallClock,
    /// The overlap report, absent when the zones never share awake time.
    pub report: Option<OverlapReport>,
}

/// Receives each freshly computed update.
pub trait ReportSink {
    fn publish(&mut self, update: &WatchUpdate);
}

/// Periodic overlap recomputation for a fixed pair of zones.
pub struct OverlapTicker<C: Clock> {
    zone_a: Tz,
    zone_b: Tz,
    policy: AwakePolicy,
    clock: C,
}

impl<C: Clock> OverlapTicker<C> {
    pub fn new(zone_a: Tz, zone_b: Tz, policy: AwakePolicy, clock: C) -> Self {
        Self {
            zone_a,
            zone_b,
            policy,
            clock,
        }
    }

    /// Compute one update at the clock's current instant.
    ///
    /// # Errors
    ///
    /// Propagates calculator failures (invalid policy, unresolvable
    /// midnight).
    pub fn tick(&self) -> Result<WatchUpdate> {
        let at = self.clock.now();
        let report = compute_overlap(self.zone_a, self.zone_b, at, &self.policy)?;
        Ok(WatchUpdate {
            at,
            local_a: WallClock::of(at, self.zone_a),
            local_b: WallClock::of(at, self.zone_b),
            report,
        })
    }

    /// Recompute every `period` and forward each update to `sink`.
    ///
    /// With `ticks = Some(n)` the loop ends after `n` updates; with `None`
    /// it runs until the task is dropped or a tick fails.
    pub async fn run<S: ReportSink>(
        &self,
        period: Duration,
        sink: &mut S,
        ticks: Option<u64>,
    ) -> Result<()> {
        let mut interval = tokio::time::interval(period);
        let mut published: u64 = 0;
        loop {
            interval.tick().await;
            let update = self.tick()?;
            sink.publish(&update);
            published += 1;
            if let Some(limit) = ticks {
                if published >= limit {
                    return Ok(());
                }
            }
        }
    }
}
