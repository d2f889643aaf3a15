//! Passphrase-gated letter.
//!
//! One long-form note behind a shared passphrase. The comparison is
//! normalized (trimmed, lowercased) so the gate forgives typing style but
//! not the words. The unlocked flag persists on this device until the
//! letter is locked again.

use thiserror::Error;

use crate::error::StoreError;
use crate::storage::{get_json, set_json, KvStore};

/// Store key for the letter text.
pub const LETTER_KEY: &str = "letter";

/// Store key for the unlocked flag.
pub const LETTER_UNLOCKED_KEY: &str = "letter_unlocked";

/// Placeholder shown until a letter is saved.
pub const DEFAULT_LETTER: &str = "Dear you,\n\nIf you are reading this, you remembered \
our words. Nothing is written yet. Leave something here and it will keep until you \
come back for it.\n\n- me";

/// Letter gate errors.
#[derive(Error, Debug)]
pub enum LetterError {
    /// Read or write attempted while the gate is engaged
    #[error("The letter is locked; unlock it with the passphrase first")]
    Locked,

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Whether this device has the letter unlocked.
pub fn is_unlocked<S: KvStore>(store: &S) -> Result<bool, StoreError> {
    Ok(get_json(store, LETTER_UNLOCKED_KEY)?.unwrap_or(false))
}

/// Try a passphrase against the configured one.
///
/// A correct attempt persists the unlocked state and returns `true`; a
/// wrong attempt returns `false` and changes nothing. A wrong passphrase
/// is an expected interaction, not an error.
pub fn unlock<S: KvStore>(
    store: &mut S,
    attempt: &str,
    passphrase: &str,
) -> Result<bool, StoreError> {
    if normalize(attempt) == normalize(passphrase) {
        set_json(store, LETTER_UNLOCKED_KEY, &true)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Re-engage the gate.
pub fn lock<S: KvStore>(store: &mut S) -> Result<(), StoreError> {
    set_json(store, LETTER_UNLOCKED_KEY, &false)
}

/// Read the letter.
///
/// # Errors
///
/// `LetterError::Locked` while the gate is engaged.
pub fn read<S: KvStore>(store: &S) -> Result<String, LetterError> {
    if !is_unlocked(store)? {
        return Err(LetterError::Locked);
    }
    Ok(get_json(store, LETTER_KEY)?.unwrap_or_else(|| DEFAULT_LETTER.to_string()))
}

/// Replace the letter.
///
/// # Errors
///
/// `LetterError::Locked` while the gate is engaged.
pub fn save<S: KvStore>(store: &mut S, text: &str) -> Result<(), LetterError> {
    if !is_unlocked(store)? {
        return Err(LetterError::Locked);
    }
    set_json(store, LETTER_KEY, &text)?;
    Ok(())
}
