//! Error types for graph operations.
//!
//! All fallible operations return [`Result<T>`] with context-rich error messages.

use thiserror::Error;

/// Result type alias for archgraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error type for all graph operations.
///
/// Errors fail fast and carry enough context to name the offending node or
/// edge. Classification is deliberately infallible and has no variant here.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Node not found in the graph
    #[error("Node not found: {node_id}")]
    NodeNotFound {
        /// ID of the missing node
        node_id: String,
    },

    /// Edge not found in the graph
    #[error("Edge not found: {edge_id}")]
    EdgeNotFound {
        /// ID of the missing edge
        edge_id: String,
    },

    /// Edge insertion referenced a node that is not in the store
    #[error("Dangling reference: edge {edge_id} references missing node {node_id}")]
    DanglingReference {
        /// ID of the rejected edge
        edge_id: String,
        /// ID of the missing endpoint
        node_id: String,
    },

    /// A node with the same id is already present
    #[error("Duplicate node: {node_id}")]
    DuplicateNode {
        /// ID of the colliding node
        node_id: String,
    },

    /// Invalid operation (e.g., inserting an edge twice)
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of what went wrong
        message: String,
    },

    /// A file's fact extraction failed during an explicit single-file rebuild
    #[error("Extraction failed for {path}: {message}")]
    Extraction {
        /// File whose fact stream could not be produced
        path: std::path::PathBuf,
        /// Error reported by the fact source
        message: String,
    },

    /// Export failure (script could not be written out)
    #[error("Export error: {message}")]
    Export {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GraphError {
    /// Create an export error from a message and optional source.
    pub fn export<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Export {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }
}
