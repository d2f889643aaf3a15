//! Core error types for cowake-core.
//!
//! This module defines the error hierarchy using thiserror. Timezone and
//! policy failures are always surfaced to the caller; there is no fallback
//! zone and no silently swallowed storage fault.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cowake-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timezone resolution errors
    #[error("Timezone error: {0}")]
    TimeZone(#[from] TimeZoneError),

    /// Awake-policy validation errors
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Keyed-store errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Timezone resolution errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeZoneError {
    /// The identifier is not in the IANA zone database
    #[error("Unrecognized IANA timezone identifier: '{0}'")]
    Unrecognized(String),

    /// A local time that cannot be mapped onto the zone's timeline,
    /// even after DST correction
    #[error("Local time {naive} does not resolve in zone '{zone}'")]
    Unresolvable {
        zone: String,
        naive: chrono::NaiveDateTime,
    },
}

/// Awake-policy validation errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// Hour bound outside 0..=24
    #[error("Awake hour {0} is out of range (0-24)")]
    HourOutOfRange(u8),

    /// Start at or after end leaves no awake time at all
    #[error("Awake window is empty: start hour {start_hour} is not before end hour {end_hour}")]
    EmptyWindow { start_hour: u8, end_hour: u8 },

    /// Scan granularity of zero or more than a day
    #[error("Invalid scan step: {0} minutes")]
    InvalidStep(u32),
}

/// Keyed-store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Store is locked by another process
    #[error("Store is locked")]
    Locked,

    /// A stored value no longer deserializes
    #[error("Stored value for '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },

    /// A value could not be serialized for storage
    #[error("Failed to encode value for '{key}': {message}")]
    Encode { key: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
