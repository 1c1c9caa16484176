//! Output destinations a sink can own.
//!
//! This module provides:
//! - `OutputTarget`: Trait for owned output destinations
//! - `OutputStream`: The closable stream an `OutputTarget` opens
//! - `FileOutput`: Files, opened with parent directory creation
//! - `InMemorySink`: A shared in-memory buffer

mod memory;
mod output;
mod std_io;

pub use memory::InMemorySink;
pub use output::{OutputStream, OutputTarget};
pub use std_io::FileOutput;

// Async I/O support
#[cfg(feature = "async")]
mod async_output;
#[cfg(feature = "async")]
mod async_std_io;

#[cfg(feature = "async")]
pub use async_output::AsyncOutputTarget;
#[cfg(feature = "async")]
pub use async_std_io::AsyncFileOutput;
