//! # archgraph
//!
//! A typed, queryable knowledge graph over codebase structure, built for
//! code-review prioritization, architectural-layer reporting, and export to
//! an external graph database.
//!
//! ## Core Principles
//!
//! - **Parser Agnostic**: facts come from an injected [`archgraph_facts::FactSource`],
//!   never from parsing source text here
//! - **Deterministic**: classification is an ordered cascade, ids are pure
//!   functions of qualified names, rebuilds of unchanged input are identical
//! - **Referential Integrity**: an edge can never reference a missing node,
//!   removing a node cascades to every touching edge
//! - **Single Writer**: only the builder mutates the store; queries are
//!   read-only over `&GraphStore`
//!
//! ## Architecture
//!
//! ```text
//! Fact Source (IDE index, fixtures)
//!     ↓
//! Graph Builder (classifiers, per-file atomic rebuild)
//!     ↓
//! Graph Store (nodes, edges, adjacency + file indices)
//!     ↓
//! Query Engine / Export Adapter / Report
//! ```
//!
//! ## Example
//!
//! ```
//! use archgraph::{GraphBuilder, GraphStore};
//! use archgraph_facts::{ClassFact, FileFacts, MemoryFactSource, MethodFact};
//!
//! let source = MemoryFactSource::new().with_file(
//!     FileFacts::new("src/OrderService.java")
//!         .with_class(ClassFact::new("com.shop.OrderService").with_annotation("Service"))
//!         .with_method(MethodFact::new("com.shop.OrderService", "placeOrder")),
//! );
//!
//! let mut store = GraphStore::new();
//! let report = GraphBuilder::new().build_project(&mut store, &source).unwrap();
//! assert_eq!(report.files_processed, 1);
//! assert_eq!(store.node_count(), 2);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod builder;
pub mod classify;
pub mod error;
pub mod export;
pub mod graph;
pub mod query;
pub mod report;

// Re-export main types
pub use builder::{BuildReport, GraphBuilder};
pub use error::{GraphError, Result};
pub use export::{CypherExporter, ExportScript};
pub use graph::{
    CallKind, ClassNode, Direction, Edge, EdgeId, EdgeKind, GraphStore, Layer, MethodNode, Node,
    NodeId, UnresolvedCall,
};
pub use query::{
    connected_nodes, detect_cycles, find_paths, impact_analysis, Cycle, ImpactReport, RiskLevel,
};
pub use report::GraphReport;
