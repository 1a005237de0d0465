//! Multi-signal classification of classes, methods, and call sites.
//!
//! Both classifiers are pure functions: the same input facts always produce
//! the same output, which keeps diffs across incremental rebuilds meaningful.

mod call;
mod layer;

pub use call::classify_call;
pub use layer::{classify_class, classify_method};
