//! # lineout
//!
//! Line-oriented console output for reporting tasks.
//!
//! ## Overview
//!
//! lineout decides, per task execution, where a reporting task's records go
//! and how they are delimited:
//! - **Option resolution**: a shared `lines` scope and a task-local scope each
//!   carry `sep` and `output-file`; the task-local scope wins as a whole only
//!   if the user set one of its options
//! - **Separator escapes**: `\n`, `\t`, `\x2c` and friends typed on a command
//!   line become the real characters
//! - **Sinks**: records go to the shared console stdout (borrowed, never
//!   closed) or to a file (created with its parent directories, truncated,
//!   closed on finish)
//! - **Broken pipes**: a reader that stops early (`| head`) ends the run
//!   quietly; every other I/O error is reported
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lineout::{Console, ConsoleTaskRunner, LineOptions};
//!
//! let shared = LineOptions::new();
//! let local = LineOptions::new().with_sep(",");
//! let runner = ConsoleTaskRunner::new(&shared, &local);
//!
//! let mut console = Console::new();
//! lineout::execute(runner.config(), &mut console, Some(["a", "b"]))?;
//! // stdout: "a,b,"
//! ```
//!
//! ## Features
//!
//! - `json` / `yaml` / `toml` - Options files in that format
//! - `async` - Async sink over tokio writers
//! - `miette` - Pretty error reporting with miette
//! - `sarge` - `ArgumentType` impls for the CLI flags
//! - `cli` - The `lineout` binary

// Core modules
pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod io;
pub mod sink;
pub mod task;

// Async modules (feature-gated)
#[cfg(feature = "async")]
pub mod sink_async;

// Re-exports for convenience
pub use config::{LineOption, LineOptions, OptionsFile, OutputConfig, resolve, unescape};
pub use console::Console;
pub use error::{BoxError, ConfigError, SinkOpenError, SinkWriteError, Stage, TaskError};
pub use io::{FileOutput, InMemorySink, OutputStream, OutputTarget};
pub use sink::{SinkHandle, SinkKind, SinkState, WriteStatus};
pub use task::{ConsoleTask, ConsoleTaskRunner, execute, try_execute};

// Async re-exports
#[cfg(feature = "async")]
pub use io::{AsyncFileOutput, AsyncOutputTarget};
#[cfg(feature = "async")]
pub use sink_async::{AsyncSinkHandle, execute_stream};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::LineoutDiagnostic;

// Internal test modules (see src/tests)
#[cfg(test)]
mod tests;
