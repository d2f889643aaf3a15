//! TOML-based application configuration.
//!
//! Stores the pair's settings:
//! - Who the two parties are and their IANA zones
//! - Awake-policy bounds and overlap scan options
//! - Countdown target
//! - Letter passphrase and watch cadence
//!
//! Configuration is stored at `~/.config/cowake/config.toml`. Zones are
//! kept as strings and resolved at use, so a bad identifier surfaces as a
//! timezone error instead of being silently replaced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, TimeZoneError};
use crate::policy::AwakePolicy;
use crate::zone::parse_zone;
use chrono_tz::Tz;

/// Pair identity: names and zones of the two parties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairConfig {
    #[serde(default = "default_name_a")]
    pub name_a: String,
    #[serde(default = "default_zone_a")]
    pub zone_a: String,
    #[serde(default = "default_name_b")]
    pub name_b: String,
    #[serde(default = "default_zone_b")]
    pub zone_b: String,
}

/// Overlap calculator and scan settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlapConfig {
    #[serde(default)]
    pub policy: AwakePolicy,
    /// Shortest shared run worth reporting, in minutes.
    #[serde(default = "default_min_window_min")]
    pub min_window_min: u32,
    /// Timeline sampling step, in minutes.
    #[serde(default = "default_step_min")]
    pub step_min: u32,
}

/// Countdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CountdownConfig {
    /// Target instant as RFC 3339, e.g. "2026-01-10T00:00:00+11:00".
    #[serde(default)]
    pub target: Option<String>,
}

/// Letter gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterConfig {
    #[serde(default = "default_passphrase")]
    pub passphrase: String,
}

/// Watch loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/cowake/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pair: PairConfig,
    #[serde(default)]
    pub overlap: OverlapConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub letter: LetterConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

// Default functions
fn default_name_a() -> String {
    "A".into()
}
fn default_zone_a() -> String {
    "Australia/Sydney".into()
}
fn default_name_b() -> String {
    "B".into()
}
fn default_zone_b() -> String {
    "America/Toronto".into()
}
fn default_min_window_min() -> u32 {
    45
}
fn default_step_min() -> u32 {
    15
}
fn default_passphrase() -> String {
    "pinky promise".into()
}
fn default_refresh_secs() -> u64 {
    1
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            name_a: default_name_a(),
            zone_a: default_zone_a(),
            name_b: default_name_b(),
            zone_b: default_zone_b(),
        }
    }
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            policy: AwakePolicy::default(),
            min_window_min: default_min_window_min(),
            step_min: default_step_min(),
        }
    }
}

impl Default for LetterConfig {
    fn default() -> Self {
        Self {
            passphrase: default_passphrase(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pair: PairConfig::default(),
            overlap: OverlapConfig::default(),
            countdown: CountdownConfig::default(),
            letter: LetterConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err("config key is empty".into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| format!("unknown config key: {key}"))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| format!("unknown config key: {key}"))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| format!("cannot parse '{value}' as number"))?
                        } else {
                            return Err(format!("cannot parse '{value}' as number").into());
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| format!("unknown config key: {key}"))?;
        }

        Err(format!("unknown config key: {key}").into())
    }

    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// Resolve the first party's zone.
    ///
    /// # Errors
    /// Surfaces `TimeZoneError::Unrecognized` for a bad identifier.
    pub fn zone_a(&self) -> Result<Tz, TimeZoneError> {
        parse_zone(&self.pair.zone_a)
    }

    /// Resolve the second party's zone.
    ///
    /// # Errors
    /// Surfaces `TimeZoneError::Unrecognized` for a bad identifier.
    pub fn zone_b(&self) -> Result<Tz, TimeZoneError> {
        parse_zone(&self.pair.zone_b)
    }

    /// Parse the configured countdown target, if any.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` when the stored string is not
    /// RFC 3339.
    pub fn countdown_target(&self) -> Result<Option<DateTime<Utc>>, ConfigError> {
        match &self.countdown.target {
            None => Ok(None),
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| ConfigError::InvalidValue {
                    key: "countdown.target".to_string(),
                    message: e.to_string(),
                }),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.pair.zone_a, "Australia/Sydney");
        assert_eq!(parsed.overlap.min_window_min, 45);
        assert_eq!(parsed.letter.passphrase, "pinky promise");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("pair.zone_b").as_deref(), Some("America/Toronto"));
        assert_eq!(cfg.get("overlap.policy.start_hour").as_deref(), Some("8"));
        assert_eq!(cfg.get("watch.refresh_secs").as_deref(), Some("1"));
        assert!(cfg.get("pair.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "overlap.step_min", "30").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "overlap.step_min").unwrap(),
            &serde_json::Value::Number(30.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_string() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "pair.zone_a", "Europe/Berlin").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "pair.zone_a").unwrap(),
            &serde_json::Value::String("Europe/Berlin".to_string())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "pair.nonexistent_key", "value");
        assert!(result.is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "overlap.step_min", "not_a_number");
        assert!(result.is_err());
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.pair.name_a, "A");
        assert_eq!(cfg.pair.zone_a, "Australia/Sydney");
        assert_eq!(cfg.pair.zone_b, "America/Toronto");
        assert_eq!(cfg.overlap.policy.start_hour, 8);
        assert_eq!(cfg.overlap.policy.end_hour, 24);
        assert_eq!(cfg.overlap.step_min, 15);
        assert_eq!(cfg.countdown.target, None);
        assert_eq!(cfg.watch.refresh_secs, 1);
    }

    #[test]
    fn zones_resolve_against_the_database() {
        let cfg = Config::default();
        assert!(cfg.zone_a().is_ok());
        assert!(cfg.zone_b().is_ok());

        let mut bad = Config::default();
        bad.pair.zone_a = "Atlantis/Sunken_City".to_string();
        assert_eq!(
            bad.zone_a().unwrap_err(),
            TimeZoneError::Unrecognized("Atlantis/Sunken_City".to_string())
        );
    }

    #[test]
    fn countdown_target_parses_rfc3339() {
        let mut cfg = Config::default();
        assert_eq!(cfg.countdown_target().unwrap(), None);

        cfg.countdown.target = Some("2026-01-10T00:00:00+11:00".to_string());
        let target = cfg.countdown_target().unwrap().unwrap();
        assert_eq!(target, Utc.with_ymd_and_hms(2026, 1, 9, 13, 0, 0).unwrap());

        cfg.countdown.target = Some("next tuesday".to_string());
        assert!(matches!(
            cfg.countdown_target(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
