//! Fact records: declared classes, declared methods, and call sites.

mod call;
mod class;
mod method;

pub use call::{CallSiteFact, Callee, ExpressionShape};
pub use class::ClassFact;
pub use method::MethodFact;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// All structural facts extracted from a single source file.
///
/// This is the unit of the builder's input scope: a whole-project build is
/// the same algorithm applied to many of these, a single-file rebuild to one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileFacts {
    /// Source file path the facts are attributed to
    pub path: PathBuf,

    /// Classes and interfaces declared in the file
    pub classes: Vec<ClassFact>,

    /// Methods declared in the file (owner given by qualified name)
    pub methods: Vec<MethodFact>,

    /// Call sites observed in the file
    pub calls: Vec<CallSiteFact>,
}

impl FileFacts {
    /// Create an empty fact set for a file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add a declared class.
    pub fn add_class(&mut self, class: ClassFact) {
        self.classes.push(class);
    }

    /// Add a declared method.
    pub fn add_method(&mut self, method: MethodFact) {
        self.methods.push(method);
    }

    /// Add a call site.
    pub fn add_call(&mut self, call: CallSiteFact) {
        self.calls.push(call);
    }

    /// Builder pattern: add a declared class and return self.
    pub fn with_class(mut self, class: ClassFact) -> Self {
        self.classes.push(class);
        self
    }

    /// Builder pattern: add a declared method and return self.
    pub fn with_method(mut self, method: MethodFact) -> Self {
        self.methods.push(method);
        self
    }

    /// Builder pattern: add a call site and return self.
    pub fn with_call(mut self, call: CallSiteFact) -> Self {
        self.calls.push(call);
        self
    }

    /// Total number of declaration facts (classes + methods).
    pub fn declaration_count(&self) -> usize {
        self.classes.len() + self.methods.len()
    }

    /// The file path as a borrowed `Path`.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
