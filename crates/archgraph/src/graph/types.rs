//! Core graph types: nodes, edges, ids, and classification enums.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Architectural layer assigned to a class or method.
///
/// Closed set; every classification resolves to one of these, with
/// [`Layer::Unknown`] as the infallible fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    /// HTTP / RPC entry points
    Controller,
    /// Business logic
    Service,
    /// Data access
    Repository,
    /// Object mapping (DTO <-> entity)
    Mapper,
    /// Persistent domain objects
    Entity,
    /// Stateless helpers
    Util,
    /// Wiring and configuration
    Config,
    /// Generic managed component
    Component,
    /// No signal matched
    Unknown,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Layer::Controller => "Controller",
            Layer::Service => "Service",
            Layer::Repository => "Repository",
            Layer::Mapper => "Mapper",
            Layer::Entity => "Entity",
            Layer::Util => "Util",
            Layer::Config => "Config",
            Layer::Component => "Component",
            Layer::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// How a call edge is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CallKind {
    /// Plain intra-type or resolved instance call
    Direct,
    /// Constructor invocation
    Constructor,
    /// Call issued from a lambda body
    Lambda,
    /// Method reference (deferred invocation)
    MethodReference,
    /// Polymorphic dispatch through an interface
    Interface,
    /// Static call
    Static,
    /// Call dispatched to an inherited implementation (`super.`)
    Inherited,
    /// Target could not be statically determined
    Unknown,
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CallKind::Direct => "Direct",
            CallKind::Constructor => "Constructor",
            CallKind::Lambda => "Lambda",
            CallKind::MethodReference => "MethodReference",
            CallKind::Interface => "Interface",
            CallKind::Static => "Static",
            CallKind::Inherited => "Inherited",
            CallKind::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// Direction for neighbor and traversal queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Follow outgoing edges (from this node)
    Outgoing,
    /// Follow incoming edges (to this node)
    Incoming,
    /// Follow edges in both directions
    Both,
}

/// Stable node identifier.
///
/// Ids are deterministic functions of qualified names: a class id is its
/// fully-qualified name, a method id is `owner#signature`. Rebuilding
/// unchanged input therefore yields byte-identical ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Id for a class, derived from its fully-qualified name.
    pub fn class(qualified_name: &str) -> Self {
        Self(qualified_name.to_string())
    }

    /// Id for a method, derived from owner qualified name + canonical signature.
    pub fn method(owner_qualified_name: &str, signature: &str) -> Self {
        Self(format!("{owner_qualified_name}#{signature}"))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable edge identifier, derived from (kind, source, target, disambiguator).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(String);

impl EdgeId {
    fn derive(label: &str, source: &NodeId, target: &NodeId, disambiguator: &str) -> Self {
        if disambiguator.is_empty() {
            Self(format!("{label}:{source}->{target}"))
        } else {
            Self(format!("{label}:{source}->{target}@{disambiguator}"))
        }
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A class or interface node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    /// Stable id (the fully-qualified name)
    pub id: NodeId,
    /// Simple name
    pub name: String,
    /// Package
    pub package: String,
    /// Architectural layer
    pub layer: Layer,
    /// Is this an interface?
    pub is_interface: bool,
    /// Is this abstract?
    pub is_abstract: bool,
    /// Id of the direct superclass, when one is declared
    pub superclass: Option<NodeId>,
    /// Ids of implemented interfaces
    pub interfaces: BTreeSet<NodeId>,
    /// Marker annotations
    pub annotations: BTreeSet<String>,
    /// Owned method ids in declaration order
    pub methods: Vec<NodeId>,
    /// File the declaration is attributed to
    pub file: PathBuf,
}

/// A method node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodNode {
    /// Stable id (`owner#signature`)
    pub id: NodeId,
    /// Method name
    pub name: String,
    /// Canonical signature
    pub signature: String,
    /// Owning class id
    pub owner: NodeId,
    /// Layer, inherited from the owner unless a method-level signal overrides
    pub layer: Layer,
    /// Return type
    pub return_type: String,
    /// Parameter types in declaration order
    pub parameter_types: Vec<String>,
    /// Declaration modifiers
    pub modifiers: BTreeSet<String>,
    /// Cyclomatic complexity (>= 1)
    pub complexity: u32,
    /// Lines of code
    pub lines_of_code: u32,
    /// File the declaration is attributed to
    pub file: PathBuf,
    /// Starting line
    pub line_start: usize,
    /// Ending line
    pub line_end: usize,
}

/// A node in the graph: a class or a method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Class or interface
    Class(ClassNode),
    /// Method
    Method(MethodNode),
}

impl Node {
    /// The node's stable id.
    pub fn id(&self) -> &NodeId {
        match self {
            Node::Class(c) => &c.id,
            Node::Method(m) => &m.id,
        }
    }

    /// The node's architectural layer.
    pub fn layer(&self) -> Layer {
        match self {
            Node::Class(c) => c.layer,
            Node::Method(m) => m.layer,
        }
    }

    /// Label used in exports ("Class" or "Method").
    pub fn label(&self) -> &'static str {
        match self {
            Node::Class(_) => "Class",
            Node::Method(_) => "Method",
        }
    }

    /// Downcast to a class node.
    pub fn as_class(&self) -> Option<&ClassNode> {
        match self {
            Node::Class(c) => Some(c),
            Node::Method(_) => None,
        }
    }

    /// Downcast to a method node.
    pub fn as_method(&self) -> Option<&MethodNode> {
        match self {
            Node::Method(m) => Some(m),
            Node::Class(_) => None,
        }
    }
}

/// Kind of relationship an edge represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Class declares method (exactly one per declared method)
    Contains,
    /// Method calls method
    Calls {
        /// Dispatch classification
        kind: CallKind,
        /// Certainty in `[0, 1]`; 1/N for interface fan-out, 0 for unknown
        confidence: f64,
        /// Call-site line number
        line: usize,
    },
    /// Class extends class
    Inherits,
    /// Class implements interface
    Implements,
}

impl EdgeKind {
    /// Relationship label, also used to derive edge ids.
    pub fn label(&self) -> &'static str {
        match self {
            EdgeKind::Contains => "CONTAINS",
            EdgeKind::Calls { .. } => "CALLS",
            EdgeKind::Inherits => "INHERITS",
            EdgeKind::Implements => "IMPLEMENTS",
        }
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Stable id derived from (kind, source, target, disambiguator)
    pub id: EdgeId,
    /// Relationship kind and payload
    pub kind: EdgeKind,
    /// Source node id
    pub source: NodeId,
    /// Target node id
    pub target: NodeId,
}

impl Edge {
    /// Containment edge: class declares method.
    pub fn contains(class: NodeId, method: NodeId) -> Self {
        let kind = EdgeKind::Contains;
        let id = EdgeId::derive(kind.label(), &class, &method, "");
        Self {
            id,
            kind,
            source: class,
            target: method,
        }
    }

    /// Call edge between two methods. The line disambiguates repeated calls.
    pub fn calls(
        source: NodeId,
        target: NodeId,
        call_kind: CallKind,
        confidence: f64,
        line: usize,
    ) -> Self {
        let kind = EdgeKind::Calls {
            kind: call_kind,
            confidence,
            line,
        };
        let id = EdgeId::derive(kind.label(), &source, &target, &line.to_string());
        Self {
            id,
            kind,
            source,
            target,
        }
    }

    /// Inheritance edge: subclass extends superclass.
    pub fn inherits(subclass: NodeId, superclass: NodeId) -> Self {
        let kind = EdgeKind::Inherits;
        let id = EdgeId::derive(kind.label(), &subclass, &superclass, "");
        Self {
            id,
            kind,
            source: subclass,
            target: superclass,
        }
    }

    /// Implementation edge: class implements interface.
    pub fn implements(class: NodeId, interface: NodeId) -> Self {
        let kind = EdgeKind::Implements;
        let id = EdgeId::derive(kind.label(), &class, &interface, "");
        Self {
            id,
            kind,
            source: class,
            target: interface,
        }
    }

    /// Whether this is a call edge.
    pub fn is_call(&self) -> bool {
        matches!(self.kind, EdgeKind::Calls { .. })
    }

    /// The call kind, for call edges.
    pub fn call_kind(&self) -> Option<CallKind> {
        match self.kind {
            EdgeKind::Calls { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// The confidence, for call edges.
    pub fn confidence(&self) -> Option<f64> {
        match self.kind {
            EdgeKind::Calls { confidence, .. } => Some(confidence),
            _ => None,
        }
    }
}
