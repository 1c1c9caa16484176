//! The console output sink.
//!
//! A `SinkHandle` owns the lifecycle of one destination: the console's stdout,
//! which it only borrows, or a file, which it opens and owns. Records are
//! written with the resolved separator appended; `finish` flushes and, for
//! files, closes.
//!
//! A reader that closes its end of the pipe early is expected (think
//! `lineout | head`). The first broken-pipe write moves the sink from
//! `Writing` to `Finishing`; every later write is skipped. Any other I/O
//! failure is returned to the caller and also stops the sink: later writes
//! fail instead of reporting a closed reader.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::OutputConfig;
use crate::console::Console;
use crate::error::{SinkOpenError, SinkWriteError, Stage};
use crate::io::{FileOutput, OutputStream, OutputTarget};

/// Identifier used for sinks writing to the console's stdout.
pub const STDOUT_ID: &str = "-";

/// Which kind of destination a sink writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// The shared console stdout, never closed by the sink
    Stdout,
    /// A stream the sink opened and closes on finish
    File,
}

/// Lifecycle state of a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    Writing,
    /// The reader went away or finishing has started; writes are skipped
    Finishing,
    Done,
}

/// Result of a successful `write` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    /// The reader closed the pipe; nothing more will be written
    ReaderClosed,
}

/// Outcome of one raw I/O call, with broken pipes split out.
#[derive(Debug)]
pub(crate) enum IoOutcome {
    Ok,
    BrokenPipe,
    Failed(io::Error),
}

impl From<io::Result<()>> for IoOutcome {
    fn from(result: io::Result<()>) -> Self {
        match result {
            Ok(()) => IoOutcome::Ok,
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => IoOutcome::BrokenPipe,
            Err(e) => IoOutcome::Failed(e),
        }
    }
}

/// Encode `record` followed by `separator` into `buf`, replacing its contents.
pub(crate) fn frame_record(buf: &mut Vec<u8>, record: &str, separator: &str) {
    buf.clear();
    buf.reserve(record.len() + separator.len());
    buf.extend_from_slice(record.as_bytes());
    buf.extend_from_slice(separator.as_bytes());
}

pub(crate) fn finished_error(target: &str) -> SinkWriteError {
    SinkWriteError {
        stage: Stage::Write,
        target: target.to_string(),
        source: io::Error::other("sink already finished"),
    }
}

pub(crate) fn halted_error(target: &str) -> SinkWriteError {
    SinkWriteError {
        stage: Stage::Write,
        target: target.to_string(),
        source: io::Error::other("sink stopped after an earlier write error"),
    }
}

enum Stream<'a> {
    Borrowed(&'a mut (dyn Write + Send)),
    Owned(Box<dyn OutputStream>),
    Closed,
}

impl Stream<'_> {
    fn writer(&mut self) -> Option<&mut (dyn Write + Send)> {
        match self {
            Stream::Borrowed(w) => Some(&mut **w),
            Stream::Owned(w) => Some(&mut **w),
            Stream::Closed => None,
        }
    }
}

/// An open console output destination.
pub struct SinkHandle<'a> {
    target: String,
    separator: String,
    kind: SinkKind,
    stream: Stream<'a>,
    state: SinkState,
    /// Set when a write failed for a reason other than a closed reader
    halted: bool,
    frame: Vec<u8>,
}

impl<'a> SinkHandle<'a> {
    /// Open the destination `config` names.
    ///
    /// Without an output file this borrows `console`'s stdout. With one, the
    /// file is created (along with missing parent directories) or truncated.
    /// The absolute path is opened; an open error names the path as given.
    pub fn open(config: &OutputConfig, console: &'a mut Console) -> Result<Self, SinkOpenError> {
        match config.output_file() {
            None => Ok(Self::borrowed(config.separator(), console.stdout())),
            Some(path) => {
                let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
                Self::with_target(config.separator(), &FileOutput::new(absolute)).map_err(|e| {
                    SinkOpenError {
                        path: path.to_path_buf(),
                        source: e.source,
                    }
                })
            }
        }
    }

    /// Wrap a borrowed, shared writer. It is flushed on finish but never closed.
    pub fn borrowed(separator: impl Into<String>, writer: &'a mut (dyn Write + Send)) -> Self {
        tracing::debug!(sink = STDOUT_ID, "writing console output to stdout");
        Self::from_stream(
            STDOUT_ID.to_string(),
            separator.into(),
            SinkKind::Stdout,
            Stream::Borrowed(writer),
        )
    }

    /// Open `target` and own the resulting stream.
    pub fn with_target(
        separator: impl Into<String>,
        target: &dyn OutputTarget,
    ) -> Result<Self, SinkOpenError> {
        let stream = target.open_overwrite().map_err(|source| SinkOpenError {
            path: PathBuf::from(target.id()),
            source,
        })?;
        tracing::debug!(sink = target.id(), "opened console output file");
        Ok(Self::from_stream(
            target.id().to_string(),
            separator.into(),
            SinkKind::File,
            Stream::Owned(stream),
        ))
    }

    fn from_stream(target: String, separator: String, kind: SinkKind, stream: Stream<'a>) -> Self {
        Self {
            target,
            separator,
            kind,
            stream,
            state: SinkState::Writing,
            halted: false,
            frame: Vec::new(),
        }
    }

    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    pub fn state(&self) -> SinkState {
        self.state
    }

    /// "-" for stdout, the file path otherwise.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Write `record` followed by the separator as one contiguous buffer.
    ///
    /// Returns `WriteStatus::ReaderClosed` once the reader has closed the pipe;
    /// the sink skips every write after that. After any other write failure,
    /// later writes return an error.
    pub fn write(&mut self, record: &str) -> Result<WriteStatus, SinkWriteError> {
        match self.state {
            SinkState::Writing => {}
            SinkState::Finishing if self.halted => return Err(halted_error(&self.target)),
            SinkState::Finishing => return Ok(WriteStatus::ReaderClosed),
            SinkState::Done => return Err(finished_error(&self.target)),
        }

        frame_record(&mut self.frame, record, &self.separator);
        let Some(writer) = self.stream.writer() else {
            return Err(finished_error(&self.target));
        };

        match IoOutcome::from(writer.write_all(&self.frame)) {
            IoOutcome::Ok => Ok(WriteStatus::Written),
            IoOutcome::BrokenPipe => {
                tracing::debug!(
                    sink = %self.target,
                    "reader closed the pipe, skipping remaining output"
                );
                self.state = SinkState::Finishing;
                Ok(WriteStatus::ReaderClosed)
            }
            IoOutcome::Failed(source) => {
                self.state = SinkState::Finishing;
                self.halted = true;
                Err(SinkWriteError {
                    stage: Stage::Write,
                    target: self.target.clone(),
                    source,
                })
            }
        }
    }

    /// Flush the stream, then close it if the sink owns it.
    ///
    /// Runs once; later calls return `Ok(())` without touching the stream.
    /// A broken pipe while flushing or closing is absorbed like one while
    /// writing. The owned stream is closed even when the flush fails; a flush
    /// failure is reported ahead of a close failure.
    pub fn finish(&mut self) -> Result<(), SinkWriteError> {
        if self.state == SinkState::Done {
            return Ok(());
        }
        self.state = SinkState::Finishing;

        let flushed = match self.stream.writer() {
            Some(writer) => IoOutcome::from(writer.flush()),
            None => IoOutcome::Ok,
        };

        // Dropping the borrow releases the console's stdout untouched.
        let closed = match std::mem::replace(&mut self.stream, Stream::Closed) {
            Stream::Owned(stream) => IoOutcome::from(stream.close()),
            Stream::Borrowed(_) | Stream::Closed => IoOutcome::Ok,
        };
        self.state = SinkState::Done;
        tracing::debug!(sink = %self.target, kind = ?self.kind, "finished console output");

        if matches!(flushed, IoOutcome::BrokenPipe) {
            tracing::debug!(sink = %self.target, "reader closed the pipe before flush");
        }
        for (stage, outcome) in [(Stage::Flush, flushed), (Stage::Close, closed)] {
            if let IoOutcome::Failed(source) = outcome {
                return Err(SinkWriteError {
                    stage,
                    target: self.target.clone(),
                    source,
                });
            }
        }
        Ok(())
    }
}

impl Drop for SinkHandle<'_> {
    fn drop(&mut self) {
        if self.state != SinkState::Done {
            tracing::warn!(
                sink = %self.target,
                "console sink dropped before finish, finishing now"
            );
            if let Err(e) = self.finish() {
                tracing::warn!(sink = %self.target, error = %e, "best-effort finish failed");
            }
        }
    }
}

impl std::fmt::Debug for SinkHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkHandle")
            .field("target", &self.target)
            .field("separator", &self.separator)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
