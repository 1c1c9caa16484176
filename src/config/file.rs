//! Options files carrying both the shared `lines` scope and a task scope.

use std::path::Path;

use serde::Deserialize;

use super::options::{LineOptions, LineOptionsConfig};
use super::resolve::{OutputConfig, resolve};
use crate::error::ConfigError;

type Parser = fn(&str) -> Result<OptionsFile, String>;

/// Serialized options for one console task invocation.
///
/// ```yaml
/// lines:
///   sep: "|"
/// task:
///   output_file: out/report.txt
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsFile {
    /// Shared line-oriented defaults
    #[serde(default)]
    pub lines: LineOptionsConfig,
    /// Task-local options
    #[serde(default)]
    pub task: LineOptionsConfig,
}

impl OptionsFile {
    /// Load an options file, choosing the parser from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let Some(parse) = parser_for(ext.as_deref()) else {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        parse(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// The shared scope as an option set.
    pub fn shared(&self) -> LineOptions {
        self.lines.clone().into()
    }

    /// The task scope as an option set.
    pub fn local(&self) -> LineOptions {
        self.task.clone().into()
    }

    /// Resolve the effective configuration from both scopes.
    pub fn resolve(&self) -> OutputConfig {
        resolve(&self.shared(), &self.local())
    }
}

fn parser_for(ext: Option<&str>) -> Option<Parser> {
    match ext {
        #[cfg(feature = "json")]
        Some("json") => Some(|s| serde_json::from_str(s).map_err(|e| e.to_string())),
        #[cfg(feature = "yaml")]
        Some("yaml" | "yml") => Some(|s| serde_yaml::from_str(s).map_err(|e| e.to_string())),
        #[cfg(feature = "toml")]
        Some("toml") => Some(|s| toml::from_str(s).map_err(|e| e.to_string())),
        _ => None,
    }
}
