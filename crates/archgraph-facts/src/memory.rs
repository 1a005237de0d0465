//! In-memory fact source for tests and synthetic streams.

use crate::entities::FileFacts;
use crate::errors::{FactError, FactResult};
use crate::traits::FactSource;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A fact source backed by a map of pre-built [`FileFacts`].
///
/// Used to exercise the engine without any host environment. Files are
/// returned in path order so builds are deterministic. Individual files can
/// be poisoned to simulate extraction failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryFactSource {
    files: BTreeMap<PathBuf, FileFacts>,
    failures: BTreeMap<PathBuf, String>,
}

impl MemoryFactSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: add one file's facts.
    pub fn with_file(mut self, facts: FileFacts) -> Self {
        self.files.insert(facts.path.clone(), facts);
        self
    }

    /// Builder pattern: make extraction fail for a file with the given message.
    pub fn with_failure(mut self, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        self.failures.insert(path.into(), message.into());
        self
    }

    /// Add or replace one file's facts.
    pub fn insert(&mut self, facts: FileFacts) {
        self.files.insert(facts.path.clone(), facts);
    }

    /// Number of files known to the source.
    pub fn len(&self) -> usize {
        self.files.len() + self.failures.len()
    }

    /// Whether the source knows no files at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.failures.is_empty()
    }
}

impl FactSource for MemoryFactSource {
    fn files(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .files
            .keys()
            .chain(self.failures.keys())
            .cloned()
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }

    fn facts_for(&self, path: &Path) -> FactResult<FileFacts> {
        if let Some(message) = self.failures.get(path) {
            return Err(FactError::Malformed(path.to_path_buf(), message.clone()));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FactError::UnknownFile(path.to_path_buf()))
    }
}
