//! Tests for error messages and stages.

use std::io;
use std::path::PathBuf;

use crate::error::{ConfigError, SinkOpenError, SinkWriteError, Stage, TaskError};

#[test]
fn stage_display() {
    assert_eq!(Stage::Open.to_string(), "Open");
    assert_eq!(Stage::Flush.to_string(), "Flush");
    assert_eq!(Stage::Produce.to_string(), "Produce");
}

#[test]
fn open_error_names_path_and_cause() {
    let err = SinkOpenError {
        path: PathBuf::from("/no/such/dir/out.txt"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
    };
    assert_eq!(
        err.to_string(),
        "error opening stream /no/such/dir/out.txt due to permission denied"
    );
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn write_error_shows_stage_and_target() {
    let err = SinkWriteError {
        stage: Stage::Write,
        target: "-".to_string(),
        source: io::Error::other("disk on fire"),
    };
    assert_eq!(err.to_string(), "[Write] -: disk on fire");
}

#[test]
fn task_error_is_transparent_over_sink_errors() {
    let open: TaskError = SinkOpenError {
        path: PathBuf::from("out.txt"),
        source: io::Error::other("nope"),
    }
    .into();
    assert_eq!(open.stage(), Stage::Open);
    assert_eq!(open.to_string(), "error opening stream out.txt due to nope");

    let write: TaskError = SinkWriteError {
        stage: Stage::Close,
        target: "out.txt".to_string(),
        source: io::Error::other("late"),
    }
    .into();
    assert_eq!(write.stage(), Stage::Close);
}

#[test]
fn records_error_message() {
    let err = TaskError::Records {
        target: "-".to_string(),
        source: "graph broke".into(),
    };
    assert_eq!(err.to_string(), "[Produce] record source for - failed: graph broke");
}

#[test]
fn config_error_messages() {
    let err = ConfigError::UnsupportedFormat {
        path: PathBuf::from("opts.ini"),
    };
    assert_eq!(err.to_string(), "unsupported options file format: opts.ini");

    let err = ConfigError::Parse {
        path: PathBuf::from("opts.json"),
        message: "expected value".into(),
    };
    assert_eq!(err.to_string(), "failed to parse options file opts.json: expected value");
}

#[cfg(feature = "miette")]
#[test]
fn miette_diagnostic_carries_help() {
    use miette::Diagnostic;

    let err: TaskError = SinkOpenError {
        path: PathBuf::from("out.txt"),
        source: io::Error::other("nope"),
    }
    .into();
    let diag = crate::error::LineoutDiagnostic::from(err);
    assert_eq!(diag.to_string(), "console output failed at [Open]");
    assert!(diag.help().is_some());
}
