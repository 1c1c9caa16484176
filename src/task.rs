//! Console tasks: resolve once, open the sink, write every record, finish.

use std::convert::Infallible;

use crate::config::{LineOptions, OutputConfig, resolve};
use crate::console::Console;
use crate::error::{BoxError, TaskError};
use crate::sink::{SinkHandle, WriteStatus};

/// A task whose only job is to print records to the console.
///
/// Console tasks produce output and nothing else; they are not meant to
/// modify build state.
pub trait ConsoleTask {
    type Record: AsRef<str>;
    type Error: Into<BoxError>;

    /// Produce the records to print. `None` prints nothing.
    ///
    /// Called after the sink is open, so a task that fails here has already
    /// had its output file created.
    fn console_output(
        &mut self,
    ) -> Option<impl Iterator<Item = Result<Self::Record, Self::Error>> + '_>;
}

/// Runs console tasks against one resolved `OutputConfig`.
#[derive(Debug, Clone)]
pub struct ConsoleTaskRunner {
    config: OutputConfig,
}

impl ConsoleTaskRunner {
    /// Resolve the shared and task-local options once for this runner.
    pub fn new(shared: &LineOptions, local: &LineOptions) -> Self {
        Self {
            config: resolve(shared, local),
        }
    }

    pub fn from_config(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Execute `task`, writing its records to the configured destination.
    pub fn run<T>(&self, task: &mut T, console: &mut Console) -> Result<(), TaskError>
    where
        T: ConsoleTask,
    {
        let mut sink = SinkHandle::open(&self.config, console)?;
        let written = write_records(&mut sink, task.console_output());
        finalize(sink, written)
    }
}

/// Write `records` to the destination `config` names.
///
/// `None` is treated as an empty sequence.
pub fn execute<I>(
    config: &OutputConfig,
    console: &mut Console,
    records: Option<I>,
) -> Result<(), TaskError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    try_execute(
        config,
        console,
        records.map(|r| r.into_iter().map(Ok::<_, Infallible>)),
    )
}

/// Like `execute`, for record sources that can fail part-way.
///
/// A producer error stops writing and is returned after the sink finishes.
pub fn try_execute<I, S, E>(
    config: &OutputConfig,
    console: &mut Console,
    records: Option<I>,
) -> Result<(), TaskError>
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<str>,
    E: Into<BoxError>,
{
    let mut sink = SinkHandle::open(config, console)?;
    let written = write_records(&mut sink, records);
    finalize(sink, written)
}

fn write_records<I, S, E>(sink: &mut SinkHandle<'_>, records: Option<I>) -> Result<(), TaskError>
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<str>,
    E: Into<BoxError>,
{
    for record in records.into_iter().flatten() {
        let record = record.map_err(|e| TaskError::Records {
            target: sink.target().to_string(),
            source: e.into(),
        })?;
        if sink.write(record.as_ref())? == WriteStatus::ReaderClosed {
            break;
        }
    }
    Ok(())
}

/// Finish the sink on every path. A finish failure replaces any earlier error.
fn finalize(mut sink: SinkHandle<'_>, written: Result<(), TaskError>) -> Result<(), TaskError> {
    if let Err(finish_err) = sink.finish() {
        if let Err(e) = &written {
            tracing::warn!(error = %e, "output error superseded by failure to finish the sink");
        }
        return Err(finish_err.into());
    }
    written
}
