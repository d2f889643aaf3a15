//! Note board commands for CLI.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use cowake_core::notes::{add_note, list_notes, remove_note};
use cowake_core::storage::SqliteStore;
use serde::Serialize;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum NoteAction {
    /// Post a note (visible for 24 hours)
    Add {
        /// Note text
        text: String,
    },
    /// List live notes, newest first
    List,
    /// Delete a note by id
    Remove {
        /// Note id
        id: String,
    },
}

#[derive(Serialize)]
struct NoteView {
    id: Uuid,
    text: String,
    posted_at: DateTime<Utc>,
    hours_left: i64,
}

pub fn run(action: NoteAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = SqliteStore::open()?;
    let now = Utc::now();

    match action {
        NoteAction::Add { text } => {
            let note = add_note(&mut store, &text, now)?;
            println!("Note posted: {}", note.id);
        }
        NoteAction::List => {
            let views: Vec<NoteView> = list_notes(&mut store, now)?
                .into_iter()
                .map(|note| NoteView {
                    id: note.id,
                    hours_left: note.hours_left(now),
                    text: note.text,
                    posted_at: note.posted_at,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        NoteAction::Remove { id } => {
            let id = Uuid::parse_str(&id)?;
            if remove_note(&mut store, id, now)? {
                println!("Note deleted: {id}");
            } else {
                println!("Note not found: {id}");
            }
        }
    }
    Ok(())
}
