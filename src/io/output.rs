//! Output target trait definition.

use std::fmt::Debug;
use std::io::{self, Write};

/// A stream a sink owns and closes once it finishes.
pub trait OutputStream: Write + Send {
    /// Release the stream, reporting any failure the release surfaces.
    ///
    /// Called after the final flush. The default just drops the stream.
    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

/// Trait for destinations a sink opens and owns.
///
/// The sink closes whatever `open_overwrite` returns once it finishes, so
/// implementors must hand out a stream the sink may close.
pub trait OutputTarget: Send + Sync + Debug {
    /// Returns a unique identifier for this output target.
    ///
    /// This is used for error messages and logging.
    /// Convention: file path for files.
    fn id(&self) -> &str;

    /// Open the target for writing, truncating any existing content.
    fn open_overwrite(&self) -> io::Result<Box<dyn OutputStream>>;
}
