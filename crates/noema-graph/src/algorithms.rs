//! Widest-path search over the concept graph.
//!
//! Path-finding mode asks for the route between two concepts whose weakest
//! link is as strong as possible: among all connecting paths, maximize the
//! minimum edge weight. This is the classic widest-path (maximum-bottleneck)
//! problem, solved with a Dijkstra variant where "sum of weights" becomes
//! "min of weights" and the frontier is ordered by largest bottleneck.
//!
//! The greedy relaxation stays optimal under this substitution because
//! appending an edge can never increase a path's bottleneck.

use crate::types::GraphModel;
use noema_core::{Error, Result};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

// ============================================================================
// Result type
// ============================================================================

/// Result of a widest-path query.
#[derive(Clone, Debug)]
pub struct PathResult {
    /// Node ids along the path, source first.
    pub nodes: Vec<String>,
    /// Edge ids along the path, in traversal order.
    pub edges: Vec<String>,
    /// The smallest edge weight along the path.
    pub bottleneck: f32,
    /// Whether a path was found.
    pub found: bool,
}

impl PathResult {
    /// Creates an empty result indicating the target is unreachable.
    pub fn not_found() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            bottleneck: 0.0,
            found: false,
        }
    }
}

// ============================================================================
// Frontier entry
// ============================================================================

/// Frontier entry ordered by bottleneck value, largest first.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    bottleneck: f32,
    node: NodeIndex,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bottleneck
            .partial_cmp(&other.bottleneck)
            .unwrap_or(Ordering::Equal)
    }
}

// ============================================================================
// Search
// ============================================================================

/// Finds the path from `from_id` to `to_id` that maximizes the minimum
/// edge weight along it.
///
/// Malformed queries are usage errors: identical endpoints yield
/// [`Error::SameEndpoints`] and an id that does not resolve yields
/// [`Error::NotFound`]. A pair of valid endpoints with no connecting path
/// is a normal outcome, reported as `Ok` with
/// [`PathResult::not_found`].
///
/// Ties between equally wide paths are broken arbitrarily; any optimal
/// path may be returned.
pub fn find_widest_path(model: &GraphModel, from_id: &str, to_id: &str) -> Result<PathResult> {
    if from_id == to_id {
        return Err(Error::same_endpoints(from_id));
    }
    let from_idx = model
        .get_index(from_id)
        .ok_or_else(|| Error::not_found("node", from_id))?;
    let to_idx = model
        .get_index(to_id)
        .ok_or_else(|| Error::not_found("node", to_id))?;

    // best[x] = largest bottleneck achieved on any path found to x so far.
    // Absent means NEG_INFINITY. The trivial path to the source has no
    // constraining edge, so its bottleneck is INFINITY.
    let mut best: HashMap<NodeIndex, f32> = HashMap::new();
    best.insert(from_idx, f32::INFINITY);

    // Predecessor on the widest path: (previous node, connecting edge id).
    let mut parent: HashMap<NodeIndex, (NodeIndex, String)> = HashMap::new();

    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        bottleneck: f32::INFINITY,
        node: from_idx,
    });

    while let Some(FrontierEntry { bottleneck, node }) = frontier.pop() {
        // Stale entry: a wider route to this node was already recorded.
        if bottleneck < best.get(&node).copied().unwrap_or(f32::NEG_INFINITY) {
            continue;
        }

        for edge_ref in model.graph.edges(node) {
            let neighbor = if edge_ref.source() == node {
                edge_ref.target()
            } else {
                edge_ref.source()
            };
            let edge = edge_ref.weight();
            let candidate = bottleneck.min(edge.weight);
            if candidate > best.get(&neighbor).copied().unwrap_or(f32::NEG_INFINITY) {
                best.insert(neighbor, candidate);
                parent.insert(neighbor, (node, edge.id.clone()));
                frontier.push(FrontierEntry {
                    bottleneck: candidate,
                    node: neighbor,
                });
            }
        }
    }

    let Some(&target_bottleneck) = best.get(&to_idx) else {
        log::debug!("no path between {from_id} and {to_id}");
        return Ok(PathResult::not_found());
    };

    // Walk predecessor links back from the target.
    let mut nodes = vec![model.graph[to_idx].id.clone()];
    let mut edges = Vec::new();
    let mut cursor = to_idx;
    while let Some((prev, via_edge)) = parent.get(&cursor) {
        edges.push(via_edge.clone());
        nodes.push(model.graph[*prev].id.clone());
        cursor = *prev;
    }
    nodes.reverse();
    edges.reverse();

    Ok(PathResult {
        nodes,
        edges,
        bottleneck: target_bottleneck,
        found: true,
    })
}

// ============================================================================
// Tests
// ============================================================================
