//! Error types for lineout operations.
//!
//! This module provides:
//! - `Stage`: Indicates where in the sink lifecycle an error occurred
//! - `SinkOpenError`: The requested output file could not be opened
//! - `SinkWriteError`: A write, flush or close failed for a reason other than a broken pipe
//! - `TaskError`: Everything a console task execution can fail with
//! - `ConfigError`: Failures loading an options file

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error used for failures coming from record producers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Error while opening the output stream
    Open,
    Write,
    Flush,
    Close,
    /// Error raised by the record producer
    Produce,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Open => write!(f, "Open"),
            Stage::Write => write!(f, "Write"),
            Stage::Flush => write!(f, "Flush"),
            Stage::Close => write!(f, "Close"),
            Stage::Produce => write!(f, "Produce"),
        }
    }
}

/// The output file could not be created or opened for writing.
#[derive(Debug, Error)]
#[error("error opening stream {} due to {source}", .path.display())]
pub struct SinkOpenError {
    /// The path that was requested
    pub path: PathBuf,
    /// The underlying I/O failure
    #[source]
    pub source: io::Error,
}

/// An I/O failure while writing to, flushing or closing an open sink.
///
/// Broken pipes never surface as this error; the sink absorbs them.
#[derive(Debug, Error)]
#[error("[{stage}] {target}: {source}")]
pub struct SinkWriteError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// Identifier of the sink ("-" for stdout, file path for files)
    pub target: String,
    /// The underlying I/O failure
    #[source]
    pub source: io::Error,
}

/// A console task execution failure.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Open(#[from] SinkOpenError),

    #[error(transparent)]
    Write(#[from] SinkWriteError),

    #[error("[Produce] record source for {target} failed: {source}")]
    Records {
        target: String,
        #[source]
        source: BoxError,
    },
}

impl TaskError {
    /// The lifecycle stage the failure belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            TaskError::Open(_) => Stage::Open,
            TaskError::Write(e) => e.stage,
            TaskError::Records { .. } => Stage::Produce,
        }
    }
}

/// Failures while loading an options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read options file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse options file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported options file format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
