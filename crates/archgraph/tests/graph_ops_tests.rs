//! Integration tests for store operations: insertion, integrity enforcement,
//! cascade removal, and atomic per-file replacement.

use archgraph::{
    CallKind, ClassNode, Direction, Edge, GraphError, GraphStore, Layer, MethodNode, Node, NodeId,
};
use std::collections::BTreeSet;
use std::path::Path;

fn class_node(qualified_name: &str) -> Node {
    let (package, name) = qualified_name
        .rsplit_once('.')
        .unwrap_or(("", qualified_name));
    Node::Class(ClassNode {
        id: NodeId::class(qualified_name),
        name: name.to_string(),
        package: package.to_string(),
        layer: Layer::Unknown,
        is_interface: false,
        is_abstract: false,
        superclass: None,
        interfaces: BTreeSet::new(),
        annotations: BTreeSet::new(),
        methods: Vec::new(),
        file: "test.java".into(),
    })
}

fn class_with_methods(qualified_name: &str, signatures: &[&str]) -> Node {
    let mut node = class_node(qualified_name);
    if let Node::Class(ref mut class) = node {
        class.methods = signatures
            .iter()
            .map(|sig| NodeId::method(qualified_name, sig))
            .collect();
    }
    node
}

fn method_node(owner: &str, signature: &str) -> Node {
    let name = signature.split('(').next().unwrap_or(signature);
    Node::Method(MethodNode {
        id: NodeId::method(owner, signature),
        name: name.to_string(),
        signature: signature.to_string(),
        owner: NodeId::class(owner),
        layer: Layer::Unknown,
        return_type: "void".to_string(),
        parameter_types: Vec::new(),
        modifiers: BTreeSet::new(),
        complexity: 1,
        lines_of_code: 0,
        file: "test.java".into(),
        line_start: 1,
        line_end: 1,
    })
}

#[test]
fn test_add_and_get_node() {
    let mut store = GraphStore::new();
    let node = class_node("com.shop.Order");
    store.add_node(node.clone(), Path::new("a.java")).unwrap();

    let fetched = store.get_node(&NodeId::class("com.shop.Order")).unwrap();
    assert_eq!(fetched, &node);
    assert_eq!(store.node_count(), 1);
}

#[test]
fn test_duplicate_node_rejected() {
    let mut store = GraphStore::new();
    store
        .add_node(class_node("com.shop.Order"), Path::new("a.java"))
        .unwrap();
    let err = store
        .add_node(class_node("com.shop.Order"), Path::new("b.java"))
        .unwrap_err();
    assert!(matches!(err, GraphError::DuplicateNode { .. }));
    assert_eq!(store.node_count(), 1);
}

#[test]
fn test_get_nonexistent_node() {
    let store = GraphStore::new();
    let err = store.get_node(&NodeId::class("com.shop.Missing")).unwrap_err();
    assert!(matches!(err, GraphError::NodeNotFound { .. }));
}

#[test]
fn test_dangling_edge_rejected_and_not_inserted() {
    let mut store = GraphStore::new();
    store
        .add_node(method_node("com.shop.A", "m()"), Path::new("a.java"))
        .unwrap();

    let edge = Edge::calls(
        NodeId::method("com.shop.A", "m()"),
        NodeId::method("com.shop.B", "n()"),
        CallKind::Direct,
        1.0,
        10,
    );
    let err = store.add_edge(edge, Path::new("a.java")).unwrap_err();
    assert!(matches!(err, GraphError::DanglingReference { .. }));
    assert_eq!(store.edge_count(), 0);
}

#[test]
fn test_remove_node_cascades_edges() {
    let mut store = GraphStore::new();
    let file = Path::new("a.java");
    store.add_node(method_node("com.shop.A", "m()"), file).unwrap();
    store.add_node(method_node("com.shop.B", "n()"), file).unwrap();
    store.add_node(method_node("com.shop.C", "o()"), file).unwrap();

    let a = NodeId::method("com.shop.A", "m()");
    let b = NodeId::method("com.shop.B", "n()");
    let c = NodeId::method("com.shop.C", "o()");
    store
        .add_edge(Edge::calls(a.clone(), b.clone(), CallKind::Direct, 1.0, 1), file)
        .unwrap();
    store
        .add_edge(Edge::calls(b.clone(), c.clone(), CallKind::Direct, 1.0, 2), file)
        .unwrap();
    assert_eq!(store.edge_count(), 2);

    // Removing B takes both touching edges with it.
    store.remove_node(&b).unwrap();
    assert_eq!(store.node_count(), 2);
    assert_eq!(store.edge_count(), 0);
    assert!(store.get_node(&a).is_ok());
    assert!(store.get_node(&c).is_ok());
}

#[test]
fn test_remove_class_cascades_owned_methods_and_their_edges() {
    let mut store = GraphStore::new();
    let file_a = Path::new("a.java");
    let file_b = Path::new("b.java");
    store
        .add_node(class_with_methods("com.app.A", &["m()"]), file_a)
        .unwrap();
    store.add_node(method_node("com.app.A", "m()"), file_a).unwrap();
    store
        .add_node(class_with_methods("com.app.B", &["n()"]), file_b)
        .unwrap();
    store.add_node(method_node("com.app.B", "n()"), file_b).unwrap();

    let a = NodeId::class("com.app.A");
    let am = NodeId::method("com.app.A", "m()");
    let b = NodeId::class("com.app.B");
    let bn = NodeId::method("com.app.B", "n()");
    store.add_edge(Edge::contains(a.clone(), am.clone()), file_a).unwrap();
    store.add_edge(Edge::contains(b.clone(), bn.clone()), file_b).unwrap();
    store
        .add_edge(
            Edge::calls(bn.clone(), am.clone(), CallKind::Direct, 1.0, 9),
            file_b,
        )
        .unwrap();

    // Removing the class takes its method and every edge touching either,
    // including the other file's call into the method.
    store.remove_node(&a).unwrap();

    assert!(!store.contains_node(&a));
    assert!(!store.contains_node(&am));
    assert!(store.edges_between(&bn, &am).is_empty());
    assert_eq!(store.node_count(), 2);
    assert_eq!(store.edge_count(), 1);
    assert!(store.contains_node(&bn));
}

#[test]
fn test_update_node_replaces_in_place() {
    let mut store = GraphStore::new();
    let file = Path::new("a.java");
    store.add_node(method_node("com.app.A", "m()"), file).unwrap();
    store.add_node(method_node("com.app.B", "n()"), file).unwrap();
    let am = NodeId::method("com.app.A", "m()");
    let bn = NodeId::method("com.app.B", "n()");
    store
        .add_edge(Edge::calls(am.clone(), bn.clone(), CallKind::Direct, 1.0, 3), file)
        .unwrap();

    let mut updated = method_node("com.app.A", "m()");
    if let Node::Method(ref mut method) = updated {
        method.layer = Layer::Service;
        method.complexity = 7;
    }
    store.update_node(updated).unwrap();

    let method = store.get_method(&am).unwrap();
    assert_eq!(method.layer, Layer::Service);
    assert_eq!(method.complexity, 7);
    // Edges and counts are untouched by an update.
    assert_eq!(store.node_count(), 2);
    assert_eq!(store.edges_between(&am, &bn).len(), 1);
}

#[test]
fn test_update_node_requires_existing_id() {
    let mut store = GraphStore::new();
    let err = store
        .update_node(method_node("com.app.Ghost", "m()"))
        .unwrap_err();
    assert!(matches!(err, GraphError::NodeNotFound { .. }));
}

#[test]
fn test_update_node_rejects_kind_change() {
    let mut store = GraphStore::new();
    store
        .add_node(class_node("com.app.A"), Path::new("a.java"))
        .unwrap();

    let mut impostor = method_node("com.app", "A"); // id collides deliberately
    if let Node::Method(ref mut method) = impostor {
        method.id = NodeId::class("com.app.A");
    }
    let err = store.update_node(impostor).unwrap_err();
    assert!(matches!(err, GraphError::InvalidOperation { .. }));
    assert!(store.get_class(&NodeId::class("com.app.A")).is_some());
}

#[test]
fn test_neighbors_by_direction() {
    let mut store = GraphStore::new();
    let file = Path::new("a.java");
    store.add_node(method_node("A", "m()"), file).unwrap();
    store.add_node(method_node("B", "n()"), file).unwrap();
    store.add_node(method_node("C", "o()"), file).unwrap();

    let a = NodeId::method("A", "m()");
    let b = NodeId::method("B", "n()");
    let c = NodeId::method("C", "o()");
    store
        .add_edge(Edge::calls(a.clone(), b.clone(), CallKind::Direct, 1.0, 1), file)
        .unwrap();
    store
        .add_edge(Edge::calls(c.clone(), b.clone(), CallKind::Direct, 1.0, 2), file)
        .unwrap();

    let out = store.neighbors(&b, Direction::Outgoing).unwrap();
    assert!(out.is_empty());

    let mut inc = store.neighbors(&b, Direction::Incoming).unwrap();
    inc.sort();
    assert_eq!(inc, vec![a.clone(), c.clone()]);

    let both = store.neighbors(&b, Direction::Both).unwrap();
    assert_eq!(both.len(), 2);
}

#[test]
fn test_edges_between() {
    let mut store = GraphStore::new();
    let file = Path::new("a.java");
    store.add_node(method_node("A", "m()"), file).unwrap();
    store.add_node(method_node("B", "n()"), file).unwrap();

    let a = NodeId::method("A", "m()");
    let b = NodeId::method("B", "n()");
    // Two call sites on different lines become two distinct edges.
    store
        .add_edge(Edge::calls(a.clone(), b.clone(), CallKind::Direct, 1.0, 10), file)
        .unwrap();
    store
        .add_edge(Edge::calls(a.clone(), b.clone(), CallKind::Direct, 1.0, 20), file)
        .unwrap();

    assert_eq!(store.edges_between(&a, &b).len(), 2);
    assert!(store.edges_between(&b, &a).is_empty());
}

#[test]
fn test_replace_file_swaps_contribution() {
    let mut store = GraphStore::new();
    let file = Path::new("a.java");
    store
        .replace_file(
            file,
            vec![class_node("com.shop.Old"), method_node("com.shop.Old", "m()")],
            vec![Edge::contains(
                NodeId::class("com.shop.Old"),
                NodeId::method("com.shop.Old", "m()"),
            )],
            Vec::new(),
        )
        .unwrap();
    assert_eq!(store.node_count(), 2);

    store
        .replace_file(file, vec![class_node("com.shop.New")], Vec::new(), Vec::new())
        .unwrap();
    assert_eq!(store.node_count(), 1);
    assert_eq!(store.edge_count(), 0);
    assert!(store.contains_node(&NodeId::class("com.shop.New")));
    assert!(!store.contains_node(&NodeId::class("com.shop.Old")));
}

#[test]
fn test_replace_file_failure_leaves_store_untouched() {
    let mut store = GraphStore::new();
    let file = Path::new("a.java");
    store
        .replace_file(file, vec![class_node("com.shop.Old")], Vec::new(), Vec::new())
        .unwrap();

    // New contribution has an edge to a node that will not exist.
    let bad_edge = Edge::contains(
        NodeId::class("com.shop.New"),
        NodeId::method("com.shop.New", "ghost()"),
    );
    let err = store
        .replace_file(file, vec![class_node("com.shop.New")], vec![bad_edge], Vec::new())
        .unwrap_err();
    assert!(matches!(err, GraphError::DanglingReference { .. }));

    // Previous contribution survives intact.
    assert_eq!(store.node_count(), 1);
    assert!(store.contains_node(&NodeId::class("com.shop.Old")));
}

#[test]
fn test_replace_file_rejects_duplicate_edges_without_mutating() {
    let mut store = GraphStore::new();
    let file = Path::new("a.java");
    store
        .replace_file(file, vec![class_node("com.shop.Old")], Vec::new(), Vec::new())
        .unwrap();

    // The same containment edge staged twice must fail validation before
    // the old contribution is removed.
    let class = NodeId::class("com.shop.New");
    let method = NodeId::method("com.shop.New", "m()");
    let err = store
        .replace_file(
            file,
            vec![class_node("com.shop.New"), method_node("com.shop.New", "m()")],
            vec![
                Edge::contains(class.clone(), method.clone()),
                Edge::contains(class, method),
            ],
            Vec::new(),
        )
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidOperation { .. }));

    assert_eq!(store.node_count(), 1);
    assert_eq!(store.edge_count(), 0);
    assert!(store.contains_node(&NodeId::class("com.shop.Old")));
}

#[test]
fn test_replace_file_rejects_edge_collision_with_other_file() {
    let mut store = GraphStore::new();
    store
        .replace_file(
            Path::new("a.java"),
            vec![method_node("com.app.A", "m()"), method_node("com.app.B", "n()")],
            vec![Edge::calls(
                NodeId::method("com.app.A", "m()"),
                NodeId::method("com.app.B", "n()"),
                CallKind::Direct,
                1.0,
                5,
            )],
            Vec::new(),
        )
        .unwrap();

    // Another file staging the identical call edge fails up front.
    let err = store
        .replace_file(
            Path::new("b.java"),
            Vec::new(),
            vec![Edge::calls(
                NodeId::method("com.app.A", "m()"),
                NodeId::method("com.app.B", "n()"),
                CallKind::Direct,
                1.0,
                5,
            )],
            Vec::new(),
        )
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidOperation { .. }));
    assert_eq!(store.edge_count(), 1);
}

#[test]
fn test_replace_file_rejects_collision_with_other_file() {
    let mut store = GraphStore::new();
    store
        .replace_file(
            Path::new("a.java"),
            vec![class_node("com.shop.Shared")],
            Vec::new(),
            Vec::new(),
        )
        .unwrap();

    let err = store
        .replace_file(
            Path::new("b.java"),
            vec![class_node("com.shop.Shared")],
            Vec::new(),
            Vec::new(),
        )
        .unwrap_err();
    assert!(matches!(err, GraphError::DuplicateNode { .. }));
}

#[test]
fn test_remove_file_cascades_cross_file_edges() {
    let mut store = GraphStore::new();
    store
        .replace_file(
            Path::new("a.java"),
            vec![method_node("com.shop.A", "m()")],
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
    store
        .replace_file(
            Path::new("b.java"),
            vec![method_node("com.shop.B", "n()")],
            vec![Edge::calls(
                NodeId::method("com.shop.B", "n()"),
                NodeId::method("com.shop.A", "m()"),
                CallKind::Direct,
                1.0,
                4,
            )],
            Vec::new(),
        )
        .unwrap();
    assert_eq!(store.edge_count(), 1);

    // Removing a.java removes its node and the b.java edge pointing at it.
    store.remove_file(Path::new("a.java"));
    assert_eq!(store.node_count(), 1);
    assert_eq!(store.edge_count(), 0);
    assert!(store.contains_node(&NodeId::method("com.shop.B", "n()")));
}

#[test]
fn test_clear() {
    let mut store = GraphStore::new();
    store
        .replace_file(
            Path::new("a.java"),
            vec![class_node("com.shop.A")],
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
    store.clear();
    assert_eq!(store.node_count(), 0);
    assert_eq!(store.edge_count(), 0);
    assert!(store.files().is_empty());
}
