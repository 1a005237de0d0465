//! Export adapters that turn the in-memory graph into external formats.

mod cypher;

pub use cypher::{CypherExporter, ExportScript};
