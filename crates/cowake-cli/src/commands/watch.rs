//! Live overlap monitor for CLI.

use std::time::Duration;

use cowake_core::storage::Config;
use cowake_core::{OverlapStatus, OverlapTicker, ReportSink, SystemClock, WatchUpdate};

/// Prints one line per update.
struct StdoutSink {
    name_a: String,
    name_b: String,
}

impl ReportSink for StdoutSink {
    fn publish(&mut self, update: &WatchUpdate) {
        let verdict = match &update.report {
            Some(report) => match report.status {
                OverlapStatus::Current => format!(
                    "awake together until {} / {}",
                    report.end_local_a, report.end_local_b
                ),
                OverlapStatus::Next => {
                    let r = report.time_remaining;
                    format!("next window in {}h {:02}m", r.hours, r.minutes)
                }
            },
            None => "no shared window".to_string(),
        };
        println!(
            "{}  {} {}  {} {}  {}",
            update.at.format("%H:%M:%SZ"),
            self.name_a,
            update.local_a,
            self.name_b,
            update.local_b,
            verdict
        );
    }
}

pub fn run(interval: Option<u64>, count: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let zone_a = config.zone_a()?;
    let zone_b = config.zone_b()?;
    let period = Duration::from_secs(interval.unwrap_or(config.watch.refresh_secs).max(1));

    tracing::info!(
        "watching {} / {} every {}s",
        zone_a.name(),
        zone_b.name(),
        period.as_secs()
    );

    let ticker = OverlapTicker::new(zone_a, zone_b, config.overlap.policy, SystemClock);
    let mut sink = StdoutSink {
        name_a: config.pair.name_a,
        name_b: config.pair.name_b,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(ticker.run(period, &mut sink, count))?;
    Ok(())
}
