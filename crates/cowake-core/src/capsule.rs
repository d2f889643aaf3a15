//! Date-locked capsule notes.
//!
//! A capsule note is addressed to a calendar date. It must be written at
//! least seven days ahead, can be read only on that exact date, and drops
//! into the history view once the date has passed. Dates are compared as
//! plain calendar dates; whoever opens the capsule does so on their own
//! local day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::StoreError;
use crate::storage::{get_json, set_json, KvStore};

/// Store key for the capsule document.
pub const CAPSULE_KEY: &str = "capsule";

/// Minimum days between writing a capsule and its date.
pub const MIN_LEAD_DAYS: i64 = 7;

/// Where a capsule date stands relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CapsuleStatus {
    /// The date is today; the note may be read.
    Open,
    /// The date is still ahead.
    Locked { days_until: i64 },
    /// The date has passed; history only.
    Closed,
}

/// Capsule operation errors.
#[derive(Error, Debug)]
pub enum CapsuleError {
    /// Write attempted inside the lead window
    #[error("Capsule notes must be written at least seven days ahead; {date} is {days_until} day(s) away")]
    TooClose { date: NaiveDate, days_until: i64 },

    /// Read attempted before the date
    #[error("The capsule for {date} is locked for another {days_until} day(s)")]
    StillLocked { date: NaiveDate, days_until: i64 },

    /// Read attempted after the date
    #[error("The capsule for {date} has closed; it was readable only on that day")]
    AlreadyClosed { date: NaiveDate },

    /// No note stored for an open date
    #[error("No capsule note exists for {date}")]
    Missing { date: NaiveDate },

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

type CapsuleMap = BTreeMap<NaiveDate, String>;

/// Classify `date` against `today`.
pub fn status_for(date: NaiveDate, today: NaiveDate) -> CapsuleStatus {
    let days_until = (date - today).num_days();
    if days_until == 0 {
        CapsuleStatus::Open
    } else if days_until > 0 {
        CapsuleStatus::Locked { days_until }
    } else {
        CapsuleStatus::Closed
    }
}

fn load_map<S: KvStore>(store: &S) -> Result<CapsuleMap, CapsuleError> {
    Ok(get_json(store, CAPSULE_KEY)?.unwrap_or_default())
}

/// Write or overwrite the note for a future date.
///
/// Empty text deletes the entry instead.
///
/// # Errors
///
/// `CapsuleError::TooClose` when the date is less than seven days ahead.
pub fn write_note<S: KvStore>(
    store: &mut S,
    date: NaiveDate,
    text: &str,
    today: NaiveDate,
) -> Result<(), CapsuleError> {
    let days_until = (date - today).num_days();
    if days_until < MIN_LEAD_DAYS {
        return Err(CapsuleError::TooClose { date, days_until });
    }
    let mut map = load_map(store)?;
    let text = text.trim();
    if text.is_empty() {
        map.remove(&date);
    } else {
        map.insert(date, text.to_string());
    }
    set_json(store, CAPSULE_KEY, &map)?;
    Ok(())
}

/// Read the note for `date`, permitted only when that date is today.
///
/// # Errors
///
/// `StillLocked` before the date, `AlreadyClosed` after it, `Missing` when
/// the day arrived but nothing was written.
pub fn read_today<S: KvStore>(
    store: &S,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<String, CapsuleError> {
    match status_for(date, today) {
        CapsuleStatus::Locked { days_until } => {
            Err(CapsuleError::StillLocked { date, days_until })
        }
        CapsuleStatus::Closed => Err(CapsuleError::AlreadyClosed { date }),
        CapsuleStatus::Open => load_map(store)?
            .get(&date)
            .cloned()
            .ok_or(CapsuleError::Missing { date }),
    }
}

/// Past capsules, newest first.
pub fn history<S: KvStore>(
    store: &S,
    today: NaiveDate,
) -> Result<Vec<(NaiveDate, String)>, CapsuleError> {
    let map = load_map(store)?;
    Ok(map.into_iter().filter(|(date, _)| *date < today).rev().collect())
}

/// Remove a future date's note, under the same lead rule as writing.
///
/// Returns whether an entry existed.
pub fn clear_note<S: KvStore>(
    store: &mut S,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<bool, CapsuleError> {
    let days_until = (date - today).num_days();
    if days_until < MIN_LEAD_DAYS {
        return Err(CapsuleError::TooClose { date, days_until });
    }
    let mut map = load_map(store)?;
    let existed = map.remove(&date).is_some();
    if existed {
        set_json(store, CAPSULE_KEY, &map)?;
    }
    Ok(existed)
}
