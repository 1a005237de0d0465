//! Read-only query engine: bounded search, cycle detection, impact analysis.
//!
//! Every function takes `&GraphStore` and never mutates it. Callers are
//! responsible for the build-then-query phase barrier; results are only
//! meaningful against a store that is not being mutated concurrently.
//!
//! Reachability-style queries follow call edges only, and skip edges of
//! [`CallKind::Unknown`]: unresolved call sites are retained for statistics
//! but excluded from reachability by default.

use crate::error::Result;
use crate::graph::{CallKind, Direction, EdgeKind, GraphStore, NodeId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// One closed class-level dependency cycle.
///
/// The sequence is closed implicitly: the last class depends on the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    /// Classes on the cycle, rotated so the smallest id comes first
    pub classes: Vec<NodeId>,
}

impl Cycle {
    /// Number of classes on the cycle.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the cycle is empty (never produced by detection).
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Risk attributed to changing a method, derived from its indirect impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    /// At most 5 transitive callers
    Low,
    /// 6 to 20 transitive callers
    Medium,
    /// 21 to 50 transitive callers
    High,
    /// More than 50 transitive callers
    Critical,
}

impl RiskLevel {
    /// Fixed thresholds on the transitive caller count. A policy, not a law.
    pub fn from_impact(transitive_callers: usize) -> Self {
        match transitive_callers {
            0..=5 => RiskLevel::Low,
            6..=20 => RiskLevel::Medium,
            21..=50 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        };
        write!(f, "{name}")
    }
}

/// Result of [`impact_analysis`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactReport {
    /// The analyzed method
    pub method: NodeId,
    /// Methods calling it directly (1 hop), sorted by id
    pub direct_callers: Vec<NodeId>,
    /// Full transitive closure of callers, sorted by id
    pub transitive_callers: Vec<NodeId>,
    /// Risk derived from the transitive caller count
    pub risk: RiskLevel,
}

/// All nodes within `depth` hops of `start` over the undirected union of
/// incoming and outgoing edges, excluding the start node itself.
///
/// # Errors
///
/// Returns [`crate::GraphError::NodeNotFound`] if the start node is missing.
pub fn connected_nodes(store: &GraphStore, start: &NodeId, depth: usize) -> Result<Vec<NodeId>> {
    store.get_node(start)?;

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<(NodeId, usize)> = VecDeque::new();
    let mut result: Vec<NodeId> = Vec::new();

    visited.insert(start.clone());
    queue.push_back((start.clone(), 0));

    while let Some((current, hops)) = queue.pop_front() {
        if hops >= depth {
            continue;
        }
        for neighbor in store.neighbors(&current, Direction::Both)? {
            if visited.insert(neighbor.clone()) {
                result.push(neighbor.clone());
                queue.push_back((neighbor, hops + 1));
            }
        }
    }

    Ok(result)
}

/// Every simple directed path from `start` to `end` along call edges, at
/// most `max_depth` hops long. Paths never revisit a node, so the search is
/// cycle-safe. Results are unranked; callers rank them.
///
/// # Errors
///
/// Returns [`crate::GraphError::NodeNotFound`] if either endpoint is missing.
pub fn find_paths(
    store: &GraphStore,
    start: &NodeId,
    end: &NodeId,
    max_depth: usize,
) -> Result<Vec<Vec<NodeId>>> {
    store.get_node(start)?;
    store.get_node(end)?;

    let mut paths: Vec<Vec<NodeId>> = Vec::new();
    let mut current_path = vec![start.clone()];
    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(start.clone());

    find_paths_recursive(
        store,
        start,
        end,
        max_depth,
        &mut current_path,
        &mut visited,
        &mut paths,
    );

    Ok(paths)
}

fn find_paths_recursive(
    store: &GraphStore,
    current: &NodeId,
    end: &NodeId,
    max_depth: usize,
    current_path: &mut Vec<NodeId>,
    visited: &mut HashSet<NodeId>,
    paths: &mut Vec<Vec<NodeId>>,
) {
    if current == end {
        paths.push(current_path.clone());
        return;
    }
    // hops used so far; extending would exceed the bound
    if current_path.len() - 1 >= max_depth {
        return;
    }

    let mut targets = call_targets(store, current);
    targets.sort();
    for target in targets {
        if visited.insert(target.clone()) {
            current_path.push(target.clone());
            find_paths_recursive(store, &target, end, max_depth, current_path, visited, paths);
            current_path.pop();
            visited.remove(&target);
        }
    }
}

/// Class-level dependency cycles.
///
/// Method-level call edges are collapsed onto their owning classes
/// (self-dependencies ignored), then each class is used as a DFS start with
/// a recursion stack; the first back-edge found per start yields one cycle.
/// Cycles are normalized and deduplicated across starts. This is
/// first-found-per-start-node, not exhaustive enumeration.
pub fn detect_cycles(store: &GraphStore) -> Vec<Cycle> {
    let deps = class_dependencies(store);

    let mut seen: BTreeSet<Vec<NodeId>> = BTreeSet::new();
    let mut cycles: Vec<Cycle> = Vec::new();
    for start in deps.keys() {
        if let Some(raw) = first_cycle_from(start, &deps) {
            let normalized = normalize_cycle(raw);
            if seen.insert(normalized.clone()) {
                cycles.push(Cycle {
                    classes: normalized,
                });
            }
        }
    }
    cycles
}

/// Direct and transitive callers of a method via reverse call-edge
/// traversal, with a derived risk level.
///
/// # Errors
///
/// Returns [`crate::GraphError::NodeNotFound`] if the method is missing.
pub fn impact_analysis(store: &GraphStore, method: &NodeId) -> Result<ImpactReport> {
    store.get_node(method)?;

    let mut direct: Vec<NodeId> = call_sources(store, method);
    direct.sort();
    direct.dedup();

    // Reverse BFS for the full closure.
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    visited.insert(method.clone());
    queue.push_back(method.clone());
    let mut transitive: Vec<NodeId> = Vec::new();

    while let Some(current) = queue.pop_front() {
        for caller in call_sources(store, &current) {
            if visited.insert(caller.clone()) {
                transitive.push(caller.clone());
                queue.push_back(caller);
            }
        }
    }
    transitive.sort();

    let risk = RiskLevel::from_impact(transitive.len());
    Ok(ImpactReport {
        method: method.clone(),
        direct_callers: direct,
        transitive_callers: transitive,
        risk,
    })
}

/// Targets of reachability-relevant call edges leaving the node.
fn call_targets(store: &GraphStore, id: &NodeId) -> Vec<NodeId> {
    store
        .outgoing(id)
        .filter(|e| reachable_call(&e.kind))
        .map(|e| e.target.clone())
        .collect()
}

/// Sources of reachability-relevant call edges arriving at the node.
fn call_sources(store: &GraphStore, id: &NodeId) -> Vec<NodeId> {
    store
        .incoming(id)
        .filter(|e| reachable_call(&e.kind))
        .map(|e| e.source.clone())
        .collect()
}

fn reachable_call(kind: &EdgeKind) -> bool {
    matches!(kind, EdgeKind::Calls { kind, .. } if *kind != CallKind::Unknown)
}

/// Collapse method-level call edges onto their owning classes.
fn class_dependencies(store: &GraphStore) -> BTreeMap<NodeId, BTreeSet<NodeId>> {
    let mut deps: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
    for class in store.classes() {
        deps.entry(class.id.clone()).or_default();
    }
    for edge in store.edges() {
        if !reachable_call(&edge.kind) {
            continue;
        }
        let (Some(source_owner), Some(target_owner)) = (
            store.get_method(&edge.source).map(|m| m.owner.clone()),
            store.get_method(&edge.target).map(|m| m.owner.clone()),
        ) else {
            continue;
        };
        if source_owner != target_owner {
            deps.entry(source_owner).or_default().insert(target_owner);
        }
    }
    deps
}

/// DFS with an explicit recursion stack; the first back-edge yields the
/// stack suffix starting at the re-entered class.
fn first_cycle_from(
    start: &NodeId,
    deps: &BTreeMap<NodeId, BTreeSet<NodeId>>,
) -> Option<Vec<NodeId>> {
    let mut stack: Vec<NodeId> = vec![start.clone()];
    let mut on_stack: HashSet<NodeId> = HashSet::new();
    on_stack.insert(start.clone());
    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(start.clone());

    dfs_cycle(start, deps, &mut stack, &mut on_stack, &mut visited)
}

fn dfs_cycle(
    current: &NodeId,
    deps: &BTreeMap<NodeId, BTreeSet<NodeId>>,
    stack: &mut Vec<NodeId>,
    on_stack: &mut HashSet<NodeId>,
    visited: &mut HashSet<NodeId>,
) -> Option<Vec<NodeId>> {
    for next in deps.get(current).into_iter().flatten() {
        if on_stack.contains(next) {
            // Back-edge: the stack from `next` onward is a closed cycle.
            let pos = stack.iter().position(|n| n == next)?;
            return Some(stack[pos..].to_vec());
        }
        if visited.insert(next.clone()) {
            stack.push(next.clone());
            on_stack.insert(next.clone());
            if let Some(cycle) = dfs_cycle(next, deps, stack, on_stack, visited) {
                return Some(cycle);
            }
            on_stack.remove(next);
            stack.pop();
        }
    }
    None
}

/// Rotate a cycle so the smallest id comes first; makes cycles found from
/// different start nodes comparable.
fn normalize_cycle(mut cycle: Vec<NodeId>) -> Vec<NodeId> {
    if cycle.is_empty() {
        return cycle;
    }
    let min_pos = cycle
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(0);
    cycle.rotate_left(min_pos);
    cycle
}
