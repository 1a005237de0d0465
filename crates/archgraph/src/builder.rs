//! Graph construction from an injected fact source.
//!
//! The builder is the single permitted mutator of the store. A build runs in
//! two passes: structure first (class nodes, method nodes, containment), then
//! relations (inheritance, implementation, calls) once every declaration in
//! scope has a node. Whole-project build and single-file rebuild are the same
//! algorithm applied to a wider or narrower scope.

use crate::classify::{classify_call, classify_class, classify_method};
use crate::error::{GraphError, Result};
use crate::graph::{
    ClassNode, Edge, EdgeId, GraphStore, Layer, MethodNode, Node, NodeId, UnresolvedCall,
};
use archgraph_facts::{Callee, ExpressionShape, FactSource, FileFacts};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Outcome of a build run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Files whose contribution was inserted
    pub files_processed: usize,
    /// Files whose extraction failed, with the reported error
    pub failed_files: Vec<(PathBuf, String)>,
    /// Whether the build stopped early on a cancellation request.
    ///
    /// A cancelled build is a consistent prefix of the full build: every
    /// inserted file is complete for the pass it went through, but files
    /// cancelled between the declaration and relation passes carry their
    /// nodes and containment edges without call or supertype edges yet.
    pub cancelled: bool,
}

impl BuildReport {
    /// Total number of files attempted.
    pub fn total_files(&self) -> usize {
        self.files_processed + self.failed_files.len()
    }

    /// Success rate (0.0 to 1.0).
    pub fn success_rate(&self) -> f64 {
        if self.total_files() == 0 {
            0.0
        } else {
            self.files_processed as f64 / self.total_files() as f64
        }
    }
}

/// Builds and incrementally rebuilds the graph from structural facts.
///
/// Cancellation is cooperative: the host sets the flag from
/// [`GraphBuilder::cancel_flag`] and the builder checks it between files, so
/// a cancelled build never leaves a half-written file. Fractional progress in
/// `[0, 1]` is reported through an optional sink after every file.
pub struct GraphBuilder {
    cancel: Arc<AtomicBool>,
    progress: Option<Box<dyn Fn(f32) + Send + Sync>>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a builder with no progress sink.
    pub fn new() -> Self {
        Self {
            cancel: Arc::new(AtomicBool::new(false)),
            progress: None,
        }
    }

    /// Builder pattern: attach a fractional-progress sink.
    pub fn with_progress<F>(mut self, sink: F) -> Self
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(sink));
        self
    }

    /// Handle the host can set to request cooperative cancellation.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Build the graph for every file the source knows about.
    ///
    /// A single file's extraction failure is logged, recorded in the report,
    /// and skipped; the store is untouched for that file. Files are inserted
    /// atomically and cancellation is only checked between files, so a
    /// cancelled build is a consistent prefix; see [`BuildReport::cancelled`]
    /// for what a mid-build cancellation leaves behind.
    ///
    /// # Errors
    ///
    /// Returns an error only for store-level violations, which indicate a
    /// malformed fact stream rather than an environmental failure.
    pub fn build_project(
        &self,
        store: &mut GraphStore,
        source: &dyn FactSource,
    ) -> Result<BuildReport> {
        let files = source.files();
        info!("building graph from {} files", files.len());
        let mut report = BuildReport::default();
        let total_units = files.len() * 2;
        let mut units_done = 0usize;

        // Pass 1: declarations. Every class and method in scope gets a node
        // before any cross-file relation is attempted.
        let mut extracted: Vec<FileFacts> = Vec::new();
        for path in &files {
            if self.cancel.load(Ordering::Relaxed) {
                info!("build cancelled after {} files", report.files_processed);
                report.cancelled = true;
                return Ok(report);
            }
            match source.facts_for(path) {
                Ok(facts) => {
                    let (nodes, contains) = self.structure(store, &facts);
                    store.replace_file(path, nodes, contains, Vec::new())?;
                    report.files_processed += 1;
                    extracted.push(facts);
                }
                Err(err) => {
                    warn!("skipping {}: {err}", path.display());
                    report.failed_files.push((path.clone(), err.to_string()));
                }
            }
            units_done += 1;
            self.emit_progress(units_done, total_units);
        }

        // Pass 2: relations against the fully declared scope.
        for facts in &extracted {
            if self.cancel.load(Ordering::Relaxed) {
                info!("build cancelled during relation pass");
                report.cancelled = true;
                return Ok(report);
            }
            let (edges, unresolved) = self.relations(store, facts);
            for edge in edges.into_values() {
                store.add_edge(edge, &facts.path)?;
            }
            for call in unresolved {
                store.record_unresolved(&facts.path, call);
            }
            units_done += 1;
            self.emit_progress(units_done, total_units);
        }

        self.emit_progress(total_units.max(1), total_units.max(1));
        debug!(
            "build complete: {} nodes, {} edges, {} unresolved calls",
            store.node_count(),
            store.edge_count(),
            store.unresolved_count()
        );
        Ok(report)
    }

    /// Rebuild a single file's contribution, atomically replacing whatever
    /// the store previously attributed to that path.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Extraction`] if the fact source cannot produce
    /// facts for the file; the store is left exactly as it was.
    pub fn build_file(
        &self,
        store: &mut GraphStore,
        source: &dyn FactSource,
        path: &Path,
    ) -> Result<()> {
        let facts = source
            .facts_for(path)
            .map_err(|err| GraphError::Extraction {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        debug!("rebuilding {}", path.display());

        let (nodes, contains) = self.structure(store, &facts);
        store.replace_file(path, nodes, contains, Vec::new())?;

        let (edges, unresolved) = self.relations(store, &facts);
        for edge in edges.into_values() {
            store.add_edge(edge, path)?;
        }
        for call in unresolved {
            store.record_unresolved(path, call);
        }
        Ok(())
    }

    fn emit_progress(&self, done: usize, total: usize) {
        if let Some(sink) = &self.progress {
            let fraction = if total == 0 {
                1.0
            } else {
                done as f32 / total as f32
            };
            sink(fraction.min(1.0));
        }
    }

    /// Stage one file's declaration nodes and containment edges.
    ///
    /// The store is consulted read-only, to inherit layers from owner
    /// classes that live in other files.
    fn structure(&self, store: &GraphStore, facts: &FileFacts) -> (Vec<Node>, Vec<Edge>) {
        let mut nodes: Vec<Node> = Vec::new();
        let mut contains: Vec<Edge> = Vec::new();

        // Classify classes first; methods inherit from them.
        let mut class_layers: BTreeMap<&str, Layer> = BTreeMap::new();
        for class in &facts.classes {
            class_layers.insert(&class.qualified_name, classify_class(class));
        }

        let mut methods_by_owner: BTreeMap<&str, Vec<NodeId>> = BTreeMap::new();
        for method in &facts.methods {
            let owner_id = NodeId::class(&method.owner);
            let owner_layer = class_layers
                .get(method.owner.as_str())
                .copied()
                .or_else(|| store.get_class(&owner_id).map(|c| c.layer))
                .unwrap_or(Layer::Unknown);

            let id = NodeId::method(&method.owner, &method.signature);
            methods_by_owner
                .entry(&method.owner)
                .or_default()
                .push(id.clone());

            let owner_in_file = class_layers.contains_key(method.owner.as_str());
            if owner_in_file || store.contains_node(&owner_id) {
                contains.push(Edge::contains(owner_id.clone(), id.clone()));
            } else {
                warn!("method {} declared without a known owner class", id);
            }

            nodes.push(Node::Method(MethodNode {
                id,
                name: method.name.clone(),
                signature: method.signature.clone(),
                owner: owner_id,
                layer: classify_method(method, owner_layer),
                return_type: method.return_type.clone(),
                parameter_types: method.parameter_types.clone(),
                modifiers: method.modifiers.iter().cloned().collect(),
                complexity: method.complexity.max(1),
                lines_of_code: method.lines_of_code,
                file: facts.path.clone(),
                line_start: method.line_start,
                line_end: method.line_end,
            }));
        }

        for class in &facts.classes {
            let id = NodeId::class(&class.qualified_name);
            nodes.push(Node::Class(ClassNode {
                id,
                name: class.simple_name().to_string(),
                package: class.package.clone(),
                layer: class_layers[class.qualified_name.as_str()],
                is_interface: class.is_interface,
                is_abstract: class.is_abstract,
                superclass: class
                    .superclasses
                    .first()
                    .map(|name| NodeId::class(name)),
                interfaces: class
                    .interfaces
                    .iter()
                    .map(|name| NodeId::class(name))
                    .collect(),
                annotations: class.annotations.iter().cloned().collect(),
                methods: methods_by_owner
                    .remove(class.qualified_name.as_str())
                    .unwrap_or_default(),
                file: facts.path.clone(),
            }));
        }

        (nodes, contains)
    }

    /// Resolve one file's relation edges against the current store state.
    ///
    /// Edges are keyed by id to collapse duplicate facts. Supertype edges are
    /// only created when the target class is part of the graph; external
    /// supertypes stay as names on the class node. Call sites that cannot be
    /// resolved become auditable [`UnresolvedCall`] records, never edges.
    fn relations(
        &self,
        store: &GraphStore,
        facts: &FileFacts,
    ) -> (BTreeMap<EdgeId, Edge>, Vec<UnresolvedCall>) {
        let mut edges: BTreeMap<EdgeId, Edge> = BTreeMap::new();
        let mut unresolved: Vec<UnresolvedCall> = Vec::new();

        for class in &facts.classes {
            let class_id = NodeId::class(&class.qualified_name);
            for superclass in &class.superclasses {
                let target = NodeId::class(superclass);
                if store.contains_node(&target) {
                    let edge = Edge::inherits(class_id.clone(), target);
                    edges.insert(edge.id.clone(), edge);
                }
            }
            for interface in &class.interfaces {
                let target = NodeId::class(interface);
                if store.contains_node(&target) {
                    let edge = Edge::implements(class_id.clone(), target);
                    edges.insert(edge.id.clone(), edge);
                }
            }
        }

        for call in &facts.calls {
            let caller = NodeId::method(&call.caller_owner, &call.caller_signature);
            match &call.callee {
                Callee::Unresolved { expression } => {
                    unresolved.push(UnresolvedCall {
                        caller,
                        expression: expression.clone(),
                        line: call.line,
                    });
                }
                Callee::Resolved { owner, method } => {
                    if !store.contains_node(&caller) {
                        warn!(
                            "call site at {}:{} has unknown caller {caller}",
                            facts.path.display(),
                            call.line
                        );
                        unresolved.push(UnresolvedCall {
                            caller,
                            expression: format!("{owner}.{method}"),
                            line: call.line,
                        });
                        continue;
                    }
                    let targets = self.resolve_targets(store, owner, method);
                    if targets.is_empty() {
                        unresolved.push(UnresolvedCall {
                            caller,
                            expression: format!("{owner}.{method}"),
                            line: call.line,
                        });
                        continue;
                    }
                    let dispatched_via_interface = store
                        .get_class(&NodeId::class(owner))
                        .map(|c| c.is_interface)
                        .unwrap_or(false);
                    let shape = if dispatched_via_interface {
                        ExpressionShape::InterfaceDispatch
                    } else {
                        call.shape
                    };
                    let (kind, confidence) = classify_call(shape, true, targets.len());
                    for target in targets {
                        let edge =
                            Edge::calls(caller.clone(), target, kind, confidence, call.line);
                        edges.insert(edge.id.clone(), edge);
                    }
                }
            }
        }

        (edges, unresolved)
    }

    /// Resolve a callee to concrete method nodes.
    ///
    /// For a class target this is the matching declared method. For an
    /// interface target the call fans out to every known implementor that
    /// declares the method, in id order for determinism.
    fn resolve_targets(&self, store: &GraphStore, owner: &str, method: &str) -> Vec<NodeId> {
        let owner_id = NodeId::class(owner);
        let Some(class) = store.get_class(&owner_id) else {
            return Vec::new();
        };

        if class.is_interface {
            let mut targets: Vec<NodeId> = store
                .classes()
                .filter(|c| c.interfaces.contains(&owner_id))
                .filter_map(|c| find_declared_method(store, c, method))
                .collect();
            // Fall back to a default implementation on the interface itself.
            if targets.is_empty() {
                if let Some(own) = find_declared_method(store, class, method) {
                    targets.push(own);
                }
            }
            targets.sort();
            targets.dedup();
            targets
        } else {
            find_declared_method(store, class, method)
                .into_iter()
                .collect()
        }
    }
}

/// Find a method declared on the class, by exact signature first, then by
/// name (first declaration wins for overloads).
fn find_declared_method(store: &GraphStore, class: &ClassNode, needle: &str) -> Option<NodeId> {
    for id in &class.methods {
        if let Some(m) = store.get_method(id) {
            if m.signature == needle {
                return Some(id.clone());
            }
        }
    }
    for id in &class.methods {
        if let Some(m) = store.get_method(id) {
            if m.name == needle {
                return Some(id.clone());
            }
        }
    }
    None
}
