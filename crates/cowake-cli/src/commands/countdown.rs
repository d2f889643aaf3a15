//! Countdown command for CLI.

use chrono::{DateTime, Utc};
use cowake_core::storage::Config;
use cowake_core::Countdown;
use serde::Serialize;

#[derive(Serialize)]
struct CountdownView {
    target: DateTime<Utc>,
    remaining: Countdown,
    reached: bool,
}

pub fn run(target: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let target = match target {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)?.with_timezone(&Utc),
        None => match config.countdown_target()? {
            Some(t) => t,
            None => {
                println!(
                    "No countdown target configured. \
                     Set one with 'config set countdown.target <RFC3339>'."
                );
                return Ok(());
            }
        },
    };

    let remaining = Countdown::until(target, Utc::now());
    let view = CountdownView {
        target,
        remaining,
        reached: remaining.is_zero(),
    };
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
