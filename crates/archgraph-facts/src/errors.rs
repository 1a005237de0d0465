//! Errors produced by fact sources.

use std::path::PathBuf;
use thiserror::Error;

/// Errors a fact source may report while extracting facts for one file.
///
/// Failures are file-scoped by design: the engine catches them per file,
/// records the failure, and continues with the remaining files.
#[derive(Error, Debug)]
pub enum FactError {
    /// Failed to read the underlying file
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    /// The fact stream for a file is malformed or only partially analyzable
    #[error("Malformed fact stream for {0}: {1}")]
    Malformed(PathBuf, String),

    /// The source has no facts recorded for the requested file
    #[error("No facts recorded for {0}")]
    UnknownFile(PathBuf),
}

/// Result type for fact-source operations.
pub type FactResult<T> = Result<T, FactError>;
