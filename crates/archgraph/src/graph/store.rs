//! In-memory graph store with adjacency and per-file attribution indices.
//!
//! Single-writer, multiple-reader: the builder is the only mutator, queries
//! take `&GraphStore`. The store enforces referential integrity at edge
//! insertion and cascades edge removal when a node is removed, so a dangling
//! edge is never observable.

use super::types::{ClassNode, Direction, Edge, EdgeId, MethodNode, Node, NodeId};
use crate::error::{GraphError, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// A call site whose target could not be statically determined.
///
/// Kept as an auditable per-file record rather than an edge: edges may not
/// reference missing nodes, but unresolved calls must still be countable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedCall {
    /// Id of the calling method
    pub caller: NodeId,
    /// Source text of the call expression
    pub expression: String,
    /// Call-site line number
    pub line: usize,
}

/// The in-memory code knowledge graph.
///
/// Node lookups are O(1) average via the id index; traversal is
/// O(degree) via the outgoing/incoming adjacency indices. Every node and
/// edge is attributed to a file path so one file's contribution can be
/// atomically replaced on rebuild. The graph has no persistence: it is
/// discarded or rebuilt on demand by the owning session.
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: HashMap<NodeId, Node>,
    edges: HashMap<EdgeId, Edge>,
    // Adjacency indexes for O(degree) neighbor lookups
    adjacency_out: HashMap<NodeId, HashSet<EdgeId>>,
    adjacency_in: HashMap<NodeId, HashSet<EdgeId>>,
    // Per-file attribution, forward and reverse
    file_nodes: HashMap<PathBuf, HashSet<NodeId>>,
    file_edges: HashMap<PathBuf, HashSet<EdgeId>>,
    node_files: HashMap<NodeId, PathBuf>,
    edge_files: HashMap<EdgeId, PathBuf>,
    unresolved: HashMap<PathBuf, Vec<UnresolvedCall>>,
}

impl GraphStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node attributed to a file.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if a node with the same id is
    /// already present.
    pub fn add_node(&mut self, node: Node, file: &Path) -> Result<()> {
        let id = node.id().clone();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode {
                node_id: id.to_string(),
            });
        }
        trace!("adding node {id}");
        self.file_nodes
            .entry(file.to_path_buf())
            .or_default()
            .insert(id.clone());
        self.node_files.insert(id.clone(), file.to_path_buf());
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Get a node by id.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn get_node(&self, id: &NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or_else(|| GraphError::NodeNotFound {
            node_id: id.to_string(),
        })
    }

    /// Whether a node with the given id is present.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get a class node by id, if present and a class.
    pub fn get_class(&self, id: &NodeId) -> Option<&ClassNode> {
        self.nodes.get(id).and_then(Node::as_class)
    }

    /// Get a method node by id, if present and a method.
    pub fn get_method(&self, id: &NodeId) -> Option<&MethodNode> {
        self.nodes.get(id).and_then(Node::as_method)
    }

    /// Replace a node in place, keeping its id, kind, edges, and file
    /// attribution.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if no node with the id exists,
    /// or [`GraphError::InvalidOperation`] if the replacement would change
    /// the node's kind.
    pub fn update_node(&mut self, node: Node) -> Result<()> {
        let id = node.id().clone();
        let current = self.nodes.get(&id).ok_or_else(|| GraphError::NodeNotFound {
            node_id: id.to_string(),
        })?;
        if current.label() != node.label() {
            return Err(GraphError::InvalidOperation {
                message: format!("cannot change the kind of node {id}"),
            });
        }
        trace!("updating node {id}");
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Remove a node and cascade-remove every edge referencing it. Removing
    /// a class also removes its declared methods (and their edges), so an
    /// ownerless method is never left behind.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return Err(GraphError::NodeNotFound {
                node_id: id.to_string(),
            });
        }
        debug!("removing node {id}");

        let owned_methods: Vec<NodeId> = match self.nodes.get(id) {
            Some(Node::Class(class)) => class.methods.clone(),
            _ => Vec::new(),
        };

        let mut touching: Vec<EdgeId> = Vec::new();
        if let Some(out) = self.adjacency_out.get(id) {
            touching.extend(out.iter().cloned());
        }
        if let Some(inc) = self.adjacency_in.get(id) {
            touching.extend(inc.iter().cloned());
        }
        trace!("cascading removal of {} edges for node {id}", touching.len());
        for edge_id in touching {
            // Self-loops appear in both indices; the second removal is a no-op.
            if self.edges.contains_key(&edge_id) {
                self.remove_edge(&edge_id)?;
            }
        }

        self.adjacency_out.remove(id);
        self.adjacency_in.remove(id);
        self.nodes.remove(id);
        if let Some(file) = self.node_files.remove(id) {
            if let Some(set) = self.file_nodes.get_mut(&file) {
                set.remove(id);
            }
        }

        for method_id in owned_methods {
            if self.nodes.contains_key(&method_id) {
                self.remove_node(&method_id)?;
            }
        }
        Ok(())
    }

    /// Add an edge attributed to a file.
    ///
    /// Both endpoints must already be present.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DanglingReference`] if either endpoint is
    /// missing (the edge is rejected, not inserted), or
    /// [`GraphError::InvalidOperation`] if an edge with the same id exists.
    pub fn add_edge(&mut self, edge: Edge, file: &Path) -> Result<EdgeId> {
        for endpoint in [&edge.source, &edge.target] {
            if !self.nodes.contains_key(endpoint) {
                return Err(GraphError::DanglingReference {
                    edge_id: edge.id.to_string(),
                    node_id: endpoint.to_string(),
                });
            }
        }
        if self.edges.contains_key(&edge.id) {
            return Err(GraphError::InvalidOperation {
                message: format!("edge already present: {}", edge.id),
            });
        }
        trace!("adding edge {}", edge.id);

        let id = edge.id.clone();
        self.adjacency_out
            .entry(edge.source.clone())
            .or_default()
            .insert(id.clone());
        self.adjacency_in
            .entry(edge.target.clone())
            .or_default()
            .insert(id.clone());
        self.file_edges
            .entry(file.to_path_buf())
            .or_default()
            .insert(id.clone());
        self.edge_files.insert(id.clone(), file.to_path_buf());
        self.edges.insert(id.clone(), edge);
        Ok(id)
    }

    /// Get an edge by id.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EdgeNotFound`] if the edge doesn't exist.
    pub fn get_edge(&self, id: &EdgeId) -> Result<&Edge> {
        self.edges.get(id).ok_or_else(|| GraphError::EdgeNotFound {
            edge_id: id.to_string(),
        })
    }

    /// Remove an edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EdgeNotFound`] if the edge doesn't exist.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<()> {
        let edge = self.edges.remove(id).ok_or_else(|| GraphError::EdgeNotFound {
            edge_id: id.to_string(),
        })?;
        if let Some(out) = self.adjacency_out.get_mut(&edge.source) {
            out.remove(id);
        }
        if let Some(inc) = self.adjacency_in.get_mut(&edge.target) {
            inc.remove(id);
        }
        if let Some(file) = self.edge_files.remove(id) {
            if let Some(set) = self.file_edges.get_mut(&file) {
                set.remove(id);
            }
        }
        Ok(())
    }

    /// All neighbor node ids connected in the given direction.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn neighbors(&self, id: &NodeId, direction: Direction) -> Result<Vec<NodeId>> {
        self.get_node(id)?;
        let mut out: HashSet<NodeId> = HashSet::new();
        if matches!(direction, Direction::Outgoing | Direction::Both) {
            for edge in self.outgoing(id) {
                out.insert(edge.target.clone());
            }
        }
        if matches!(direction, Direction::Incoming | Direction::Both) {
            for edge in self.incoming(id) {
                out.insert(edge.source.clone());
            }
        }
        Ok(out.into_iter().collect())
    }

    /// Edges leaving the node. Empty for unknown ids.
    pub fn outgoing(&self, id: &NodeId) -> impl Iterator<Item = &Edge> {
        self.adjacency_out
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(move |edge_id| self.edges.get(edge_id))
    }

    /// Edges arriving at the node. Empty for unknown ids.
    pub fn incoming(&self, id: &NodeId) -> impl Iterator<Item = &Edge> {
        self.adjacency_in
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(move |edge_id| self.edges.get(edge_id))
    }

    /// All edges from `source` to `target`.
    pub fn edges_between(&self, source: &NodeId, target: &NodeId) -> Vec<&Edge> {
        self.outgoing(source)
            .filter(|edge| &edge.target == target)
            .collect()
    }

    /// Record an unresolved call attributed to a file.
    pub fn record_unresolved(&mut self, file: &Path, call: UnresolvedCall) {
        self.unresolved
            .entry(file.to_path_buf())
            .or_default()
            .push(call);
    }

    /// All unresolved-call records across files.
    pub fn unresolved_calls(&self) -> impl Iterator<Item = &UnresolvedCall> {
        self.unresolved.values().flatten()
    }

    /// Total number of unresolved-call records.
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.values().map(Vec::len).sum()
    }

    /// Atomically replace one file's entire contribution.
    ///
    /// Validation happens before any mutation: every new edge endpoint must
    /// resolve to a node that will be present after the swap (a surviving
    /// node of another file or a node in the incoming set). On any
    /// validation failure the store is left exactly as it was.
    ///
    /// Removing the file's previous nodes cascades removal of edges from
    /// other files that referenced them, preserving the no-dangling-edge
    /// invariant.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if an incoming node collides
    /// with a node owned by another file,
    /// [`GraphError::DanglingReference`] if an incoming edge would dangle,
    /// or [`GraphError::InvalidOperation`] if the contribution repeats a
    /// node or edge id or collides with a surviving edge.
    pub fn replace_file(
        &mut self,
        file: &Path,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        unresolved: Vec<UnresolvedCall>,
    ) -> Result<()> {
        // Everything the swap will remove: the file's own nodes plus methods
        // owned by its classes, which the node cascade takes along.
        let mut outgoing_ids: HashSet<&NodeId> = self
            .file_nodes
            .get(file)
            .map(|set| set.iter().collect())
            .unwrap_or_default();
        let mut cascaded: HashSet<&NodeId> = HashSet::new();
        for id in &outgoing_ids {
            if let Some(Node::Class(class)) = self.nodes.get(*id) {
                cascaded.extend(class.methods.iter());
            }
        }
        outgoing_ids.extend(cascaded);
        let incoming_ids: HashSet<&NodeId> = nodes.iter().map(Node::id).collect();

        if incoming_ids.len() != nodes.len() {
            return Err(GraphError::InvalidOperation {
                message: format!("duplicate node ids in contribution for {}", file.display()),
            });
        }
        for id in &incoming_ids {
            if self.nodes.contains_key(*id) && !outgoing_ids.contains(*id) {
                return Err(GraphError::DuplicateNode {
                    node_id: id.to_string(),
                });
            }
        }
        let mut incoming_edge_ids: HashSet<&EdgeId> = HashSet::new();
        for edge in &edges {
            if !incoming_edge_ids.insert(&edge.id) {
                return Err(GraphError::InvalidOperation {
                    message: format!("duplicate edge ids in contribution for {}", file.display()),
                });
            }
            let collides = self.edges.contains_key(&edge.id)
                && self.edge_files.get(&edge.id).map(PathBuf::as_path) != Some(file);
            if collides {
                return Err(GraphError::InvalidOperation {
                    message: format!("edge already present: {}", edge.id),
                });
            }
            for endpoint in [&edge.source, &edge.target] {
                let survives =
                    self.nodes.contains_key(endpoint) && !outgoing_ids.contains(endpoint);
                if !survives && !incoming_ids.contains(endpoint) {
                    return Err(GraphError::DanglingReference {
                        edge_id: edge.id.to_string(),
                        node_id: endpoint.to_string(),
                    });
                }
            }
        }

        debug!(
            "replacing contribution of {}: {} nodes, {} edges",
            file.display(),
            nodes.len(),
            edges.len()
        );
        self.remove_file(file);
        for node in nodes {
            self.add_node(node, file)?;
        }
        for edge in edges {
            self.add_edge(edge, file)?;
        }
        if !unresolved.is_empty() {
            self.unresolved.insert(file.to_path_buf(), unresolved);
        }
        Ok(())
    }

    /// Remove one file's entire contribution. No-op for unknown files.
    pub fn remove_file(&mut self, file: &Path) {
        if let Some(edge_ids) = self.file_edges.remove(file) {
            for edge_id in edge_ids {
                if self.edges.contains_key(&edge_id) {
                    let _ = self.remove_edge(&edge_id);
                }
                self.edge_files.remove(&edge_id);
            }
        }
        if let Some(node_ids) = self.file_nodes.remove(file) {
            for node_id in node_ids {
                if self.nodes.contains_key(&node_id) {
                    // remove_node also scrubs node_files and file_nodes;
                    // the file entry itself is already gone.
                    let _ = self.remove_node(&node_id);
                }
                self.node_files.remove(&node_id);
            }
        }
        self.unresolved.remove(file);
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate over all edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Iterate over all class nodes.
    pub fn classes(&self) -> impl Iterator<Item = &ClassNode> {
        self.nodes.values().filter_map(Node::as_class)
    }

    /// Iterate over all method nodes.
    pub fn methods(&self) -> impl Iterator<Item = &MethodNode> {
        self.nodes.values().filter_map(Node::as_method)
    }

    /// Files with a recorded contribution.
    pub fn files(&self) -> Vec<&Path> {
        let mut files: Vec<&Path> = self
            .file_nodes
            .keys()
            .chain(self.file_edges.keys())
            .chain(self.unresolved.keys())
            .map(PathBuf::as_path)
            .collect();
        files.sort();
        files.dedup();
        files
    }

    /// Drop every node, edge, and record.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.adjacency_out.clear();
        self.adjacency_in.clear();
        self.file_nodes.clear();
        self.file_edges.clear();
        self.node_files.clear();
        self.edge_files.clear();
        self.unresolved.clear();
    }
}
