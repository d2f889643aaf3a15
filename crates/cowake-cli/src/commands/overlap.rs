//! Awake-overlap commands for CLI.

use chrono::Utc;
use chrono_tz::Tz;
use clap::Subcommand;
use cowake_core::storage::Config;
use cowake_core::{
    compute_overlap, find_next_window, parse_zone, scan_timeline, zone_diff_hours, OverlapStatus,
};

#[derive(Subcommand)]
pub enum OverlapAction {
    /// Current or next shared awake window
    Status {
        /// First zone (IANA id, default from config)
        #[arg(long)]
        zone_a: Option<String>,
        /// Second zone (IANA id, default from config)
        #[arg(long)]
        zone_b: Option<String>,
        /// Human-readable output instead of JSON
        #[arg(long)]
        friendly: bool,
    },
    /// Sample the next 24 hours of shared awake time
    Timeline {
        /// First zone (IANA id, default from config)
        #[arg(long)]
        zone_a: Option<String>,
        /// Second zone (IANA id, default from config)
        #[arg(long)]
        zone_b: Option<String>,
        /// Sampling step in minutes (default from config)
        #[arg(long)]
        step: Option<u32>,
    },
    /// First upcoming window at least the minimum length
    Next {
        /// First zone (IANA id, default from config)
        #[arg(long)]
        zone_a: Option<String>,
        /// Second zone (IANA id, default from config)
        #[arg(long)]
        zone_b: Option<String>,
        /// Minimum window length in minutes (default from config)
        #[arg(long)]
        min: Option<u32>,
    },
}

pub fn run(action: OverlapAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match action {
        OverlapAction::Status {
            zone_a,
            zone_b,
            friendly,
        } => {
            let now = Utc::now();
            let (za, zb) = resolve_zones(&config, zone_a, zone_b)?;
            match compute_overlap(za, zb, now, &config.overlap.policy)? {
                Some(report) if friendly => {
                    let apart = zone_diff_hours(za, zb, now).abs();
                    println!(
                        "{} and {} are {apart:.1} hours apart.",
                        config.pair.name_a, config.pair.name_b
                    );
                    match report.status {
                        OverlapStatus::Current => println!("Awake together right now."),
                        OverlapStatus::Next => {
                            let r = report.time_remaining;
                            println!(
                                "Next shared window opens in {}h {:02}m.",
                                r.hours, r.minutes
                            );
                        }
                    }
                    println!(
                        "  {} ({}): {} - {}",
                        config.pair.name_a,
                        za.name(),
                        report.start_local_a.truncated_to_hour(),
                        report.end_local_a.truncated_to_hour()
                    );
                    println!(
                        "  {} ({}): {} - {}",
                        config.pair.name_b,
                        zb.name(),
                        report.start_local_b.truncated_to_hour(),
                        report.end_local_b.truncated_to_hour()
                    );
                }
                Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                None => println!("No shared awake window under the current policy."),
            }
        }
        OverlapAction::Timeline {
            zone_a,
            zone_b,
            step,
        } => {
            let (za, zb) = resolve_zones(&config, zone_a, zone_b)?;
            let step = step.unwrap_or(config.overlap.step_min);
            let entries = scan_timeline(Utc::now(), za, zb, step, &config.overlap.policy)?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OverlapAction::Next { zone_a, zone_b, min } => {
            let (za, zb) = resolve_zones(&config, zone_a, zone_b)?;
            let min = min.unwrap_or(config.overlap.min_window_min);
            let found = find_next_window(
                Utc::now(),
                za,
                zb,
                min,
                config.overlap.step_min,
                &config.overlap.policy,
            )?;
            match found {
                Some(window) => println!("{}", serde_json::to_string_pretty(&window)?),
                None => println!("No shared window of at least {min} minutes in the next day."),
            }
        }
    }
    Ok(())
}

/// Zones from flags where given, from config otherwise.
fn resolve_zones(
    config: &Config,
    zone_a: Option<String>,
    zone_b: Option<String>,
) -> Result<(Tz, Tz), Box<dyn std::error::Error>> {
    let a = match zone_a {
        Some(id) => parse_zone(&id)?,
        None => config.zone_a()?,
    };
    let b = match zone_b {
        Some(id) => parse_zone(&id)?,
        None => config.zone_b()?,
    };
    Ok((a, b))
}
