//! Asynchronous console output sink.
//!
//! Mirrors `SinkHandle` for tokio writers: same framing, same broken-pipe
//! state machine. Finishing flushes and, for owned streams, shuts them down.
//! There is no async drop, so an unfinished handle only logs a warning.

use std::path::PathBuf;

use futures::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::OutputConfig;
use crate::error::{BoxError, SinkOpenError, SinkWriteError, Stage, TaskError};
use crate::io::{AsyncFileOutput, AsyncOutputTarget};
use crate::sink::{
    IoOutcome, STDOUT_ID, SinkKind, SinkState, WriteStatus, finished_error, frame_record,
    halted_error,
};

enum AsyncStream<'a> {
    Borrowed(&'a mut (dyn AsyncWrite + Unpin + Send)),
    Owned(Box<dyn AsyncWrite + Unpin + Send>),
    Closed,
}

impl AsyncStream<'_> {
    fn writer(&mut self) -> Option<&mut (dyn AsyncWrite + Unpin + Send)> {
        match self {
            AsyncStream::Borrowed(w) => Some(&mut **w),
            AsyncStream::Owned(w) => Some(w.as_mut()),
            AsyncStream::Closed => None,
        }
    }
}

/// An open asynchronous console output destination.
pub struct AsyncSinkHandle<'a> {
    target: String,
    separator: String,
    kind: SinkKind,
    stream: AsyncStream<'a>,
    state: SinkState,
    halted: bool,
    frame: Vec<u8>,
}

impl<'a> AsyncSinkHandle<'a> {
    /// Open the destination `config` names, borrowing `stdout` when it names none.
    pub async fn open(
        config: &OutputConfig,
        stdout: &'a mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<Self, SinkOpenError> {
        match config.output_file() {
            None => Ok(Self::borrowed(config.separator(), stdout)),
            Some(path) => {
                let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
                Self::with_target(config.separator(), &AsyncFileOutput::new(absolute))
                    .await
                    .map_err(|e| SinkOpenError {
                        path: path.to_path_buf(),
                        source: e.source,
                    })
            }
        }
    }

    /// Wrap a borrowed, shared writer. It is flushed on finish but never shut down.
    pub fn borrowed(
        separator: impl Into<String>,
        writer: &'a mut (dyn AsyncWrite + Unpin + Send),
    ) -> Self {
        Self {
            target: STDOUT_ID.to_string(),
            separator: separator.into(),
            kind: SinkKind::Stdout,
            stream: AsyncStream::Borrowed(writer),
            state: SinkState::Writing,
            halted: false,
            frame: Vec::new(),
        }
    }

    /// Open `target` and own the resulting stream.
    pub async fn with_target(
        separator: impl Into<String>,
        target: &dyn AsyncOutputTarget,
    ) -> Result<Self, SinkOpenError> {
        let stream = target
            .open_overwrite()
            .await
            .map_err(|source| SinkOpenError {
                path: PathBuf::from(target.id()),
                source,
            })?;
        tracing::debug!(sink = target.id(), "opened async console output file");
        Ok(Self {
            target: target.id().to_string(),
            separator: separator.into(),
            kind: SinkKind::File,
            stream: AsyncStream::Owned(stream),
            state: SinkState::Writing,
            halted: false,
            frame: Vec::new(),
        })
    }

    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    pub fn state(&self) -> SinkState {
        self.state
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Write `record` followed by the separator as one contiguous buffer.
    pub async fn write(&mut self, record: &str) -> Result<WriteStatus, SinkWriteError> {
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

        match IoOutcome::from(writer.write_all(&self.frame).await) {
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

    /// Flush, then shut down the stream if the sink owns it. Runs once.
    pub async fn finish(&mut self) -> Result<(), SinkWriteError> {
        if self.state == SinkState::Done {
            return Ok(());
        }
        self.state = SinkState::Finishing;

        let flushed = match self.stream.writer() {
            Some(writer) => IoOutcome::from(writer.flush().await),
            None => IoOutcome::Ok,
        };

        let closed = match std::mem::replace(&mut self.stream, AsyncStream::Closed) {
            AsyncStream::Owned(mut writer) => IoOutcome::from(writer.shutdown().await),
            AsyncStream::Borrowed(_) | AsyncStream::Closed => IoOutcome::Ok,
        };
        self.state = SinkState::Done;
        tracing::debug!(sink = %self.target, kind = ?self.kind, "finished async console output");

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

impl Drop for AsyncSinkHandle<'_> {
    fn drop(&mut self) {
        if self.state != SinkState::Done {
            tracing::warn!(sink = %self.target, "async console sink dropped before finish");
        }
    }
}

impl std::fmt::Debug for AsyncSinkHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncSinkHandle")
            .field("target", &self.target)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Write a stream of records to the destination `config` names.
///
/// The async counterpart of `task::try_execute`: `None` means no records, a
/// broken pipe ends writing quietly, and the sink is always finished, with a
/// finish failure replacing any earlier error.
pub async fn execute_stream<St, S, E>(
    config: &OutputConfig,
    stdout: &mut (dyn AsyncWrite + Unpin + Send),
    records: Option<St>,
) -> Result<(), TaskError>
where
    St: Stream<Item = Result<S, E>>,
    S: AsRef<str>,
    E: Into<BoxError>,
{
    let mut sink = AsyncSinkHandle::open(config, stdout).await?;

    let written = match records {
        Some(records) => write_stream(&mut sink, records).await,
        None => Ok(()),
    };

    if let Err(finish_err) = sink.finish().await {
        if let Err(e) = &written {
            tracing::warn!(error = %e, "output error superseded by failure to finish the sink");
        }
        return Err(finish_err.into());
    }
    written
}

async fn write_stream<St, S, E>(
    sink: &mut AsyncSinkHandle<'_>,
    records: St,
) -> Result<(), TaskError>
where
    St: Stream<Item = Result<S, E>>,
    S: AsRef<str>,
    E: Into<BoxError>,
{
    let mut records = std::pin::pin!(records);
    while let Some(record) = records.next().await {
        let record = record.map_err(|e| TaskError::Records {
            target: sink.target().to_string(),
            source: e.into(),
        })?;
        if sink.write(record.as_ref()).await? == WriteStatus::ReaderClosed {
            break;
        }
    }
    Ok(())
}
