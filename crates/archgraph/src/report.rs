//! Aggregate graph report.
//!
//! A single read-only pass over the store producing layer and call-kind
//! distributions, the largest classes, and cross-layer call flows. The whole
//! report is serde-serializable so it can be dumped as JSON.

use crate::error::{GraphError, Result};
use crate::graph::{CallKind, EdgeKind, GraphStore, Layer, NodeId};
use serde::Serialize;
use std::collections::BTreeMap;

/// One directed layer-to-layer call flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerFlow {
    /// Layer of the calling method
    pub from: Layer,
    /// Layer of the called method
    pub to: Layer,
    /// Number of call edges between the two layers
    pub count: usize,
}

/// A class ranked by how many methods it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassMethodCount {
    /// Class id
    pub class: NodeId,
    /// Number of declared methods
    pub methods: usize,
}

/// Aggregate statistics over a built graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphReport {
    /// Total nodes
    pub node_count: usize,
    /// Total edges
    pub edge_count: usize,
    /// Total class nodes
    pub class_count: usize,
    /// Total method nodes
    pub method_count: usize,
    /// Call sites whose target was never resolved
    pub unresolved_count: usize,
    /// Classes per architectural layer
    pub classes_per_layer: BTreeMap<Layer, usize>,
    /// Call edges per dispatch kind; `Unknown` counts unresolved records
    pub calls_per_kind: BTreeMap<CallKind, usize>,
    /// Largest classes by declared method count, descending
    pub top_classes_by_method_count: Vec<ClassMethodCount>,
    /// Call traffic between distinct layers, sorted by (from, to)
    pub layer_flows: Vec<LayerFlow>,
}

impl GraphReport {
    /// Collect a report, keeping at most `top_n` entries in the class
    /// ranking. Ties are broken by ascending class id, so the ranking is
    /// deterministic.
    pub fn collect(store: &GraphStore, top_n: usize) -> Self {
        let mut classes_per_layer: BTreeMap<Layer, usize> = BTreeMap::new();
        let mut ranked: Vec<ClassMethodCount> = Vec::new();
        for class in store.classes() {
            *classes_per_layer.entry(class.layer).or_default() += 1;
            ranked.push(ClassMethodCount {
                class: class.id.clone(),
                methods: class.methods.len(),
            });
        }
        ranked.sort_by(|a, b| b.methods.cmp(&a.methods).then(a.class.cmp(&b.class)));
        ranked.truncate(top_n);

        let mut calls_per_kind: BTreeMap<CallKind, usize> = BTreeMap::new();
        let mut flows: BTreeMap<(Layer, Layer), usize> = BTreeMap::new();
        for edge in store.edges() {
            let EdgeKind::Calls { kind, .. } = &edge.kind else {
                continue;
            };
            *calls_per_kind.entry(*kind).or_default() += 1;

            let (Some(source), Some(target)) = (
                store.get_method(&edge.source),
                store.get_method(&edge.target),
            ) else {
                continue;
            };
            if source.layer != target.layer {
                *flows.entry((source.layer, target.layer)).or_default() += 1;
            }
        }
        let unresolved_count = store.unresolved_count();
        if unresolved_count > 0 {
            *calls_per_kind.entry(CallKind::Unknown).or_default() += unresolved_count;
        }

        let layer_flows = flows
            .into_iter()
            .map(|((from, to), count)| LayerFlow { from, to, count })
            .collect();

        GraphReport {
            node_count: store.node_count(),
            edge_count: store.edge_count(),
            class_count: store.classes().count(),
            method_count: store.methods().count(),
            unresolved_count,
            classes_per_layer,
            calls_per_kind,
            top_classes_by_method_count: ranked,
            layer_flows,
        }
    }

    /// Render the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Export`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GraphError::export("failed to serialize report", Some(e)))
    }
}
