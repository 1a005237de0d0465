//! The injected fact-source interface.

use crate::entities::FileFacts;
use crate::errors::FactResult;
use std::path::{Path, PathBuf};

/// Produces structural facts per file for the graph builder.
///
/// Implementations wrap an external analyzer: an IDE index, a compiler
/// front end, or an in-memory fixture. The engine treats the source as
/// opaque and only requires a stable file order and per-file extraction.
pub trait FactSource {
    /// Files this source can produce facts for, in a stable order.
    fn files(&self) -> Vec<PathBuf>;

    /// Extract the structural facts for one file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FactError`] if the file cannot be analyzed. The
    /// builder treats such failures as file-scoped: logged, recorded, and
    /// skipped without aborting the overall build.
    fn facts_for(&self, path: &Path) -> FactResult<FileFacts>;
}
