//! Keyed JSON state storage.
//!
//! Each feature owns one key and serializes its whole state as a JSON
//! document under it, last write wins. The backing store is pluggable:
//! SQLite on disk for the real application, a plain map for tests and
//! ephemeral use.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::data_dir;
use crate::error::StoreError;

/// Backing store for keyed values.
pub trait KvStore {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Returns whether it existed.
    fn delete(&mut self, key: &str) -> Result<bool, StoreError>;
}

/// Read and decode a JSON document.
///
/// # Errors
///
/// A present value that no longer deserializes is `StoreError::Corrupt`;
/// it is never silently discarded.
pub fn get_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            }),
    }
}

/// Encode and write a JSON document.
pub fn set_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: KvStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Encode {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, &raw)
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// SQLite-backed store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at `~/.config/cowake/cowake.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("cowake.db");
        let store = Self::open_at(&path)?;
        Ok(store)
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get("test").unwrap().is_none());
        store.set("test", "hello").unwrap();
        assert_eq!(store.get("test").unwrap().unwrap(), "hello");
        assert!(store.delete("test").unwrap());
        assert!(!store.delete("test").unwrap());
        assert!(store.get("test").unwrap().is_none());
    }

    #[test]
    fn sqlite_store_roundtrip() {
        let mut store = SqliteStore::open_memory().unwrap();
        assert!(store.get("test").unwrap().is_none());
        store.set("test", "hello").unwrap();
        store.set("test", "world").unwrap();
        assert_eq!(store.get("test").unwrap().unwrap(), "world");
        assert!(store.delete("test").unwrap());
        assert!(store.get("test").unwrap().is_none());
    }

    #[test]
    fn json_helpers_roundtrip() {
        let mut store = MemoryStore::new();
        set_json(&mut store, "nums", &vec![1u32, 2, 3]).unwrap();
        let nums: Option<Vec<u32>> = get_json(&store, "nums").unwrap();
        assert_eq!(nums, Some(vec![1, 2, 3]));
        let missing: Option<Vec<u32>> = get_json(&store, "absent").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn corrupt_values_are_reported_not_dropped() {
        let mut store = MemoryStore::new();
        store.set("nums", "not json at all").unwrap();
        let err = get_json::<Vec<u32>, _>(&store, "nums").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "nums"));
    }
}
