//! Typed graph model and the in-memory store.

mod store;
mod types;

pub use store::{GraphStore, UnresolvedCall};
pub use types::{
    CallKind, ClassNode, Direction, Edge, EdgeId, EdgeKind, Layer, MethodNode, Node, NodeId,
};
