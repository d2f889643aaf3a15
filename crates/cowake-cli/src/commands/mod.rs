//! CLI command implementations.

pub mod capsule;
pub mod completions;
pub mod config;
pub mod countdown;
pub mod letter;
pub mod note;
pub mod overlap;
pub mod watch;
