mod config;
pub mod store;

pub use config::Config;
pub use store::{get_json, set_json, KvStore, MemoryStore, SqliteStore};

use std::path::PathBuf;

/// Returns `~/.config/cowake[-dev]/` based on COWAKE_ENV.
///
/// Set COWAKE_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("COWAKE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("cowake-dev")
    } else {
        base_dir.join("cowake")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
