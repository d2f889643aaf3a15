//! Awake-hour policy.
//!
//! The policy describes one person's daily awake window in local wall-clock
//! hours. The same policy applies to both parties; it is the calendar date
//! and zone offset that differ between them.

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

fn default_start_hour() -> u8 {
    8
}

fn default_end_hour() -> u8 {
    24
}

/// Daily awake window in local hours: `[start_hour, end_hour)`.
///
/// `start_hour` is the first awake hour (inclusive, 0-23), `end_hour` the
/// first asleep hour (exclusive, 1-24). The default window is 08:00 to
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwakePolicy {
    #[serde(default = "default_start_hour")]
    pub start_hour: u8,
    #[serde(default = "default_end_hour")]
    pub end_hour: u8,
}

impl Default for AwakePolicy {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
        }
    }
}

impl AwakePolicy {
    /// Create a validated policy.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError` if either bound is out of range or the window
    /// is empty.
    pub fn new(start_hour: u8, end_hour: u8) -> Result<Self, PolicyError> {
        let policy = Self {
            start_hour,
            end_hour,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the policy's bounds.
    ///
    /// A zero-length or inverted window is rejected rather than treated as
    /// "never awake": it is a configuration mistake, not a usable input.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.start_hour > 23 {
            return Err(PolicyError::HourOutOfRange(self.start_hour));
        }
        if self.end_hour > 24 {
            return Err(PolicyError::HourOutOfRange(self.end_hour));
        }
        if self.start_hour >= self.end_hour {
            return Err(PolicyError::EmptyWindow {
                start_hour: self.start_hour,
                end_hour: self.end_hour,
            });
        }
        Ok(())
    }

    /// Length of the awake window in minutes.
    pub fn awake_minutes(&self) -> u32 {
        (u32::from(self.end_hour) - u32::from(self.start_hour)) * 60
    }

    /// Whether a local hour falls inside the awake window.
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= u32::from(self.start_hour) && hour < u32::from(self.end_hour)
    }
}
