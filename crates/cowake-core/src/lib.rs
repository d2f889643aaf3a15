//! # Cowake Core Library
//!
//! Core logic for Cowake, a toolkit for two people keeping a shared routine
//! across timezones. It implements a CLI-first philosophy: every operation
//! is available through the standalone CLI binary, and any richer frontend
//! is a thin layer over this same library.
//!
//! ## Architecture
//!
//! - **Overlap calculator**: pure interval arithmetic over two IANA zones,
//!   anchored on DST-corrected local midnights. The caller supplies the
//!   reference instant; nothing in here reads the wall clock.
//! - **Watch ticker**: periodic re-evaluation of the calculator, forwarding
//!   each report to a display sink
//! - **Storage**: SQLite-backed keyed state and TOML-based configuration
//! - **Pair features**: countdown, 24-hour notes, date-locked capsule,
//!   passphrase-gated letter
//!
//! ## Key Components
//!
//! - [`compute_overlap`]: the awake-window calculator
//! - [`AwakePolicy`]: local awake-hour bounds
//! - [`OverlapTicker`]: tick-driven recomputation loop
//! - [`KvStore`]: pluggable keyed storage (SQLite or in-memory)
//! - [`Config`]: application configuration management

pub mod capsule;
pub mod clock;
pub mod countdown;
pub mod error;
pub mod letter;
pub mod notes;
pub mod overlap;
pub mod policy;
pub mod storage;
pub mod watch;
pub mod zone;

pub use capsule::{CapsuleError, CapsuleStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use countdown::Countdown;
pub use error::{ConfigError, CoreError, PolicyError, Result, StoreError, TimeZoneError};
pub use letter::LetterError;
pub use notes::{Note, NoteError};
pub use overlap::{
    compute_overlap, find_next_window, is_awake, scan_timeline, OverlapReport, OverlapStatus,
    OverlapWindow, TimeRemaining, TimelineEntry,
};
pub use policy::AwakePolicy;
pub use storage::{data_dir, Config, KvStore, MemoryStore, SqliteStore};
pub use watch::{OverlapTicker, ReportSink, WatchUpdate};
pub use zone::{local_date, local_midnight, offset_minutes, parse_zone, zone_diff_hours, WallClock};
