//! CLI integration helpers for lineout.
//!
//! Each line-oriented scope has two flags, `sep` and `output-file`. A flag the
//! user never passed must stay *default* so resolution can fall back to the
//! shared scope, which is why the argument types below only exist when a
//! value was given.
//!
//! # Example with sarge
//!
//! ```rust,ignore
//! use lineout::cli::{LinesArgs, OutputFile, Separator};
//! use sarge::prelude::*;
//!
//! let mut reader = ArgumentReader::new();
//! let sep = reader.add::<Separator>(tag::long("sep"));
//! let out = reader.add::<OutputFile>(tag::long("output-file"));
//! let args = reader.parse()?;
//!
//! let local = LinesArgs::new()
//!     .with_sep(sep.get(&args).and_then(Result::ok))
//!     .with_output_file(out.get(&args).transpose()?)
//!     .into_options();
//! ```

use std::path::PathBuf;

use crate::config::LineOptions;

/// A `--sep` value exactly as typed, escape sequences untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator(pub String);

/// An `--output-file` value, kept exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile(pub PathBuf);

/// `--output-file` was given without a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("output file flag needs a non-empty path")]
pub struct EmptyOutputPath;

/// The flags of one line-oriented scope, each present only if the user passed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinesArgs {
    pub sep: Option<Separator>,
    pub output_file: Option<OutputFile>,
}

impl LinesArgs {
    /// Create new empty arguments.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sep(mut self, sep: Option<Separator>) -> Self {
        self.sep = sep;
        self
    }

    pub fn with_output_file(mut self, output_file: Option<OutputFile>) -> Self {
        self.output_file = output_file;
        self
    }

    /// Whether the user passed any flag of this scope.
    pub fn is_empty(&self) -> bool {
        self.sep.is_none() && self.output_file.is_none()
    }

    /// Convert into an option set; passed flags become non-default.
    pub fn into_options(self) -> LineOptions {
        let mut options = LineOptions::new();
        if let Some(Separator(sep)) = self.sep {
            options = options.with_sep(sep);
        }
        if let Some(OutputFile(path)) = self.output_file {
            options = options.with_output_file(path);
        }
        options
    }
}

impl From<LinesArgs> for LineOptions {
    fn from(args: LinesArgs) -> Self {
        args.into_options()
    }
}

#[cfg(feature = "sarge")]
mod sarge;
