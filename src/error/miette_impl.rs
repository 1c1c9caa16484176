//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{ConfigError, Stage, TaskError};

/// A diagnostic wrapper for lineout errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct LineoutDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<TaskError> for LineoutDiagnostic {
    fn from(e: TaskError) -> Self {
        let help = match e.stage() {
            Stage::Open => "Check that the --output-file path is writable",
            Stage::Write | Stage::Flush | Stage::Close => "The output destination rejected the data",
            Stage::Produce => "The task failed while producing its output",
        };
        LineoutDiagnostic {
            message: format!("console output failed at [{}]", e.stage()),
            source: Some(Box::new(e)),
            help: Some(help.into()),
            severity: Severity::Error,
        }
    }
}

impl From<ConfigError> for LineoutDiagnostic {
    fn from(e: ConfigError) -> Self {
        let help = match &e {
            ConfigError::UnsupportedFormat { .. } => {
                "Use a .json, .yaml, .yml or .toml file with the matching feature enabled"
            }
            _ => "Check the options file path and syntax",
        };
        LineoutDiagnostic {
            message: "invalid options file".into(),
            source: Some(Box::new(e)),
            help: Some(help.into()),
            severity: Severity::Error,
        }
    }
}

impl From<TaskError> for miette::Report {
    fn from(e: TaskError) -> Self {
        miette::Report::new(LineoutDiagnostic::from(e))
    }
}
