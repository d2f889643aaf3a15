//! Ephemeral paired notes.
//!
//! A note lives for 24 hours from posting. The whole board is one JSON
//! document in the keyed store; reading the board prunes expired notes and
//! persists the pruned list, so stale entries never accumulate.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::StoreError;
use crate::storage::{get_json, set_json, KvStore};

/// Store key for the note board document.
pub const NOTES_KEY: &str = "notes";

/// Lifetime of a note.
pub const NOTE_TTL_HOURS: i64 = 24;

/// Note board errors.
#[derive(Error, Debug)]
pub enum NoteError {
    /// Whitespace-only note text
    #[error("Note text is empty")]
    EmptyText,

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A single note on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

impl Note {
    /// Instant the note stops being readable.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.posted_at + Duration::hours(NOTE_TTL_HOURS)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    /// Hours until expiry, rounded to the nearest hour, floored at zero.
    pub fn hours_left(&self, now: DateTime<Utc>) -> i64 {
        let mins = (self.expires_at() - now).num_minutes();
        ((mins + 30).div_euclid(60)).max(0)
    }
}

fn load_board<S: KvStore>(store: &S) -> Result<Vec<Note>, NoteError> {
    Ok(get_json(store, NOTES_KEY)?.unwrap_or_default())
}

/// Post a note to the board.
///
/// The text is trimmed; the new note goes to the front of the board.
///
/// # Errors
///
/// `NoteError::EmptyText` for whitespace-only text, plus store failures.
pub fn add_note<S: KvStore>(
    store: &mut S,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Note, NoteError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(NoteError::EmptyText);
    }
    let note = Note {
        id: Uuid::new_v4(),
        text: text.to_string(),
        posted_at: now,
    };
    let mut board = list_notes(store, now)?;
    board.insert(0, note.clone());
    set_json(store, NOTES_KEY, &board)?;
    Ok(note)
}

/// Live notes, newest first.
///
/// Expired notes are removed from the store as a side effect.
pub fn list_notes<S: KvStore>(
    store: &mut S,
    now: DateTime<Utc>,
) -> Result<Vec<Note>, NoteError> {
    let board = load_board(store)?;
    let live: Vec<Note> = board
        .iter()
        .filter(|note| !note.is_expired(now))
        .cloned()
        .collect();
    if live.len() != board.len() {
        set_json(store, NOTES_KEY, &live)?;
    }
    Ok(live)
}

/// Delete a note by id. Returns whether it existed (and was still live).
pub fn remove_note<S: KvStore>(
    store: &mut S,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<bool, NoteError> {
    let mut board = list_notes(store, now)?;
    let before = board.len();
    board.retain(|note| note.id != id);
    if board.len() == before {
        return Ok(false);
    }
    set_json(store, NOTES_KEY, &board)?;
    Ok(true)
}
