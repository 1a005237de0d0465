//! Cypher batch-script export.
//!
//! Produces `CREATE` statements for nodes and `MATCH ... CREATE` statements
//! for relationships, in dependency order so every statement's prerequisites
//! appear in an earlier statement: classes, then methods, then containment,
//! then the remaining relationships. Within each group statements are sorted
//! by id, so the same graph always exports the same script.

use crate::error::{GraphError, Result};
use crate::graph::{Edge, EdgeKind, GraphStore};
use log::info;
use std::path::Path;

/// Default number of statements per batch.
const DEFAULT_BATCH_SIZE: usize = 25;
/// Upper bound on statements per batch.
const MAX_BATCH_SIZE: usize = 50;

/// Exports a [`GraphStore`] as a batched Cypher script.
#[derive(Debug, Clone)]
pub struct CypherExporter {
    batch_size: usize,
}

impl Default for CypherExporter {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl CypherExporter {
    /// Exporter with the default batch size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch size, clamped to `1..=50`.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
        self
    }

    /// Render the whole store as an ordered, batched script.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if an edge endpoint cannot be
    /// resolved, which indicates store corruption and should not happen.
    pub fn export(&self, store: &GraphStore) -> Result<ExportScript> {
        let mut statements: Vec<String> = Vec::new();

        let mut classes: Vec<_> = store.classes().collect();
        classes.sort_by(|a, b| a.id.cmp(&b.id));
        for class in classes {
            statements.push(format!(
                "CREATE (:Class {{id: \"{}\", name: \"{}\", package: \"{}\", layer: \"{}\", \
                 isInterface: {}, isAbstract: {}}});",
                quote(class.id.as_str()),
                quote(&class.name),
                quote(&class.package),
                class.layer,
                class.is_interface,
                class.is_abstract
            ));
        }

        let mut methods: Vec<_> = store.methods().collect();
        methods.sort_by(|a, b| a.id.cmp(&b.id));
        for method in methods {
            statements.push(format!(
                "CREATE (:Method {{id: \"{}\", name: \"{}\", signature: \"{}\", layer: \"{}\", \
                 complexity: {}, linesOfCode: {}}});",
                quote(method.id.as_str()),
                quote(&method.name),
                quote(&method.signature),
                method.layer,
                method.complexity,
                method.lines_of_code
            ));
        }

        let mut containment: Vec<&Edge> = Vec::new();
        let mut relations: Vec<&Edge> = Vec::new();
        for edge in store.edges() {
            match edge.kind {
                EdgeKind::Contains => containment.push(edge),
                _ => relations.push(edge),
            }
        }
        containment.sort_by(|a, b| a.id.cmp(&b.id));
        relations.sort_by(|a, b| a.id.cmp(&b.id));
        for edge in containment.into_iter().chain(relations) {
            statements.push(self.edge_statement(store, edge)?);
        }

        info!(
            "exported {} statements in {} batches",
            statements.len(),
            statements.len().div_ceil(self.batch_size)
        );

        let batches = statements
            .chunks(self.batch_size)
            .map(|chunk| chunk.join("\n"))
            .collect();
        Ok(ExportScript { batches })
    }

    fn edge_statement(&self, store: &GraphStore, edge: &Edge) -> Result<String> {
        let source_label = store.get_node(&edge.source)?.label();
        let target_label = store.get_node(&edge.target)?.label();

        let properties = match &edge.kind {
            EdgeKind::Calls {
                kind,
                confidence,
                line,
            } => format!(" {{kind: \"{kind}\", confidence: {confidence}, line: {line}}}"),
            _ => String::new(),
        };

        Ok(format!(
            "MATCH (a:{source_label} {{id: \"{}\"}}), (b:{target_label} {{id: \"{}\"}}) \
             CREATE (a)-[:{}{properties}]->(b);",
            quote(edge.source.as_str()),
            quote(edge.target.as_str()),
            edge.kind.label()
        ))
    }
}

/// A rendered script, split into executable batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportScript {
    /// Batches of newline-joined statements, in execution order
    pub batches: Vec<String>,
}

impl ExportScript {
    /// Total number of statements across all batches.
    pub fn statement_count(&self) -> usize {
        self.batches
            .iter()
            .map(|batch| batch.lines().count())
            .sum()
    }

    /// The full script as one string, batches separated by blank lines.
    pub fn to_text(&self) -> String {
        self.batches.join("\n\n")
    }

    /// Write the full script to a file.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Export`] when the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text()).map_err(|e| {
            GraphError::export(format!("failed to write {}", path.display()), Some(e))
        })
    }
}

/// Escape backslashes and double quotes for embedding in a quoted literal.
fn quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
