//! Raw line-oriented option sets.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default separator: the two-character literal `\n`, unescaped on resolution.
pub const DEFAULT_SEP: &str = "\\n";

/// The options every line-oriented scope carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOption {
    Sep,
    OutputFile,
}

impl LineOption {
    /// The option's flag name without the scope prefix.
    pub fn name(&self) -> &'static str {
        match self {
            LineOption::Sep => "sep",
            LineOption::OutputFile => "output-file",
        }
    }
}

/// One scope's `sep` and `output-file` values, plus whether the caller set them.
///
/// A value counts as non-default as soon as it is set explicitly, even when it
/// equals the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOptions {
    sep: String,
    output_file: Option<PathBuf>,
    sep_set: bool,
    output_file_set: bool,
}

impl LineOptions {
    /// Create an option set holding only defaults.
    pub fn new() -> Self {
        Self {
            sep: DEFAULT_SEP.to_string(),
            output_file: None,
            sep_set: false,
            output_file_set: false,
        }
    }

    /// Set the raw (still escaped) separator.
    pub fn with_sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self.sep_set = true;
        self
    }

    /// Set the output file.
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self.output_file_set = true;
        self
    }

    /// The raw separator, escape sequences untouched.
    pub fn sep(&self) -> &str {
        &self.sep
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    /// Whether `option` still holds its default value.
    pub fn is_default(&self, option: LineOption) -> bool {
        match option {
            LineOption::Sep => !self.sep_set,
            LineOption::OutputFile => !self.output_file_set,
        }
    }

    /// True when any option was set by the caller.
    pub fn is_overridden(&self) -> bool {
        !self.is_default(LineOption::Sep) || !self.is_default(LineOption::OutputFile)
    }
}

impl Default for LineOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized form of one scope, as found in an options file.
///
/// Keys that are present count as explicitly set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineOptionsConfig {
    #[serde(default)]
    pub sep: Option<String>,
    #[serde(default, alias = "output-file")]
    pub output_file: Option<PathBuf>,
}

impl From<LineOptionsConfig> for LineOptions {
    fn from(cfg: LineOptionsConfig) -> Self {
        let mut options = LineOptions::new();
        if let Some(sep) = cfg.sep {
            options = options.with_sep(sep);
        }
        if let Some(path) = cfg.output_file {
            options = options.with_output_file(path);
        }
        options
    }
}
