use std::convert::Infallible;
use std::path::PathBuf;

use sarge::ArgumentType;

use crate::cli::{EmptyOutputPath, OutputFile, Separator};

impl ArgumentType for Separator {
    type Error = Infallible;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        // `--sep` with no value means an empty separator, not the default.
        Some(Ok(Separator(val.unwrap_or_default().to_string())))
    }

    fn default_value() -> Option<Self> {
        None
    }
}

impl ArgumentType for OutputFile {
    type Error = EmptyOutputPath;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        match val {
            Some(path) if !path.is_empty() => Some(Ok(OutputFile(PathBuf::from(path)))),
            _ => Some(Err(EmptyOutputPath)),
        }
    }

    fn default_value() -> Option<Self> {
        None
    }
}
