//! Capsule commands for CLI.
//!
//! Dates are calendar dates in a zone; `--zone` picks whose clock decides
//! what "today" is (first zone from config when omitted).

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use cowake_core::capsule::{clear_note, history, read_today, status_for, write_note};
use cowake_core::storage::{Config, SqliteStore};
use cowake_core::{local_date, parse_zone, CapsuleError, CapsuleStatus};
use serde::Serialize;

#[derive(Subcommand)]
pub enum CapsuleAction {
    /// Seal a message for a future date (at least seven days ahead)
    Make {
        /// Delivery date, YYYY-MM-DD
        date: String,
        /// Message text (empty clears the entry)
        text: String,
        /// Zone whose calendar decides "today" (IANA id)
        #[arg(long)]
        zone: Option<String>,
    },
    /// Read the message for today, or check another date's gate
    View {
        /// Delivery date, YYYY-MM-DD (default: today)
        date: Option<String>,
        /// Zone whose calendar decides "today" (IANA id)
        #[arg(long)]
        zone: Option<String>,
    },
    /// Past messages, newest first
    History {
        /// Zone whose calendar decides "today" (IANA id)
        #[arg(long)]
        zone: Option<String>,
    },
    /// Remove a future date's message
    Clear {
        /// Delivery date, YYYY-MM-DD
        date: String,
        /// Zone whose calendar decides "today" (IANA id)
        #[arg(long)]
        zone: Option<String>,
    },
}

#[derive(Serialize)]
struct CapsuleView {
    date: NaiveDate,
    text: String,
}

pub fn run(action: CapsuleAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut store = SqliteStore::open()?;

    match action {
        CapsuleAction::Make { date, text, zone } => {
            let date = parse_date(&date)?;
            let today = today_in(&config, zone)?;
            write_note(&mut store, date, &text, today)?;
            if text.trim().is_empty() {
                println!("Capsule cleared for {date}.");
            } else if let CapsuleStatus::Locked { days_until } = status_for(date, today) {
                println!("Capsule sealed for {date}, opens in {days_until} days.");
            }
        }
        CapsuleAction::View { date, zone } => {
            let today = today_in(&config, zone)?;
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => today,
            };
            match read_today(&store, date, today) {
                Ok(text) => println!("{text}"),
                Err(CapsuleError::Missing { date }) => println!("No capsule for {date}."),
                Err(e) => return Err(e.into()),
            }
        }
        CapsuleAction::History { zone } => {
            let today = today_in(&config, zone)?;
            let past: Vec<CapsuleView> = history(&store, today)?
                .into_iter()
                .map(|(date, text)| CapsuleView { date, text })
                .collect();
            println!("{}", serde_json::to_string_pretty(&past)?);
        }
        CapsuleAction::Clear { date, zone } => {
            let date = parse_date(&date)?;
            let today = today_in(&config, zone)?;
            if clear_note(&mut store, date, today)? {
                println!("Capsule cleared for {date}.");
            } else {
                println!("No capsule for {date}.");
            }
        }
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
}

fn today_in(config: &Config, zone: Option<String>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    let zone = match zone {
        Some(id) => parse_zone(&id)?,
        None => config.zone_a()?,
    };
    Ok(local_date(Utc::now(), zone))
}
