//! The process-wide console.
//!
//! A `Console` holds the stdout and stderr writers that every part of a run
//! shares. Sinks borrow its stdout; nothing in this crate closes it.

use std::fmt;
use std::io::{self, Write};

/// Shared stdout/stderr pair.
pub struct Console {
    stdout: Box<dyn Write + Send>,
    stderr: Box<dyn Write + Send>,
}

impl Console {
    /// A console over the real process streams.
    pub fn new() -> Self {
        Self {
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    /// A console over caller-supplied writers.
    pub fn with_streams(
        stdout: impl Write + Send + 'static,
        stderr: impl Write + Send + 'static,
    ) -> Self {
        Self {
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
        }
    }

    pub fn stdout(&mut self) -> &mut (dyn Write + Send) {
        self.stdout.as_mut()
    }

    pub fn stderr(&mut self) -> &mut (dyn Write + Send) {
        self.stderr.as_mut()
    }

    pub fn write_stdout(&mut self, payload: &str) -> io::Result<()> {
        self.stdout.write_all(payload.as_bytes())
    }

    pub fn write_stderr(&mut self, payload: &str) -> io::Result<()> {
        self.stderr.write_all(payload.as_bytes())
    }

    /// Write `payload` and a newline to stdout.
    pub fn print_stdout(&mut self, payload: &str) -> io::Result<()> {
        writeln!(self.stdout, "{payload}")
    }

    /// Write `payload` and a newline to stderr.
    pub fn print_stderr(&mut self, payload: &str) -> io::Result<()> {
        writeln!(self.stderr, "{payload}")
    }

    /// Flush stdout, then stderr.
    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
