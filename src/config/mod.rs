//! Configuration types for line-oriented output.
//!
//! This module provides:
//! - `LineOptions`: One scope's raw `sep` / `output-file` values and their default-ness
//! - `resolve`: Picks the shared or task-local scope and unescapes the separator
//! - `OutputConfig`: The effective, immutable configuration of one task execution
//! - `OptionsFile`: Both scopes loaded from a JSON, YAML or TOML file

mod file;
mod options;
mod resolve;

pub use file::OptionsFile;
pub use options::{DEFAULT_SEP, LineOption, LineOptions, LineOptionsConfig};
pub use resolve::{OutputConfig, resolve, unescape};
