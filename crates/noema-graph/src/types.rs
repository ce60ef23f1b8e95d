//! Core types for the concept graph.
//!
//! The viewer's graph is undirected: an edge between two concepts is the
//! same edge no matter which endpoint the backend labeled `source`. The
//! model enforces three invariants:
//!
//! - node ids are unique,
//! - every edge's endpoints exist at insertion time,
//! - at most one edge exists per unordered endpoint pair.
//!
//! Nodes and edges are never removed or mutated once inserted; deletion is
//! the backend's concern, not the viewer's.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Node struct
// ============================================================================

/// A node in the concept graph.
///
/// Nodes represent concepts. The backend reuses the concept name as the id,
/// so `name` defaults to the id at construction. Display attributes the
/// core does not interpret (definitions, styling hints) go in `metadata`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier. Immutable once the node is in a model.
    pub id: String,
    /// Human-readable label.
    pub name: String,
    /// Optional subject domain (e.g. "thermodynamics").
    pub domain: Option<String>,
    /// Opaque display attributes as key-value pairs.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Node {
    /// Creates a new node whose name equals its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            domain: None,
            metadata: HashMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the subject domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Adds a metadata key-value pair.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Edge struct
// ============================================================================

/// An edge connecting two nodes.
///
/// Although the endpoints are labeled `from` and `to` (matching the wire
/// format), the edge is undirected: `{a, b}` and `{b, a}` are the same
/// edge for every lookup and traversal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Identifier used by the host to correlate with rendered items.
    pub id: String,
    /// One endpoint's node id.
    pub from: String,
    /// The other endpoint's node id.
    pub to: String,
    /// Relation strength. The backend scores 1-5; not validated here.
    pub weight: f32,
    /// Free-text description of the relation.
    pub relation: Option<String>,
    /// Opaque attributes as key-value pairs.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Edge {
    /// Creates a new edge with an id synthesized from the endpoint pair.
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f32) -> Self {
        let from = from.into();
        let to = to.into();
        Self {
            id: Edge::pair_id(&from, &to),
            from,
            to,
            weight,
            relation: None,
            metadata: HashMap::new(),
        }
    }

    /// Sets an explicit id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the relation text.
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    /// Adds a metadata key-value pair.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Deterministic id for an unordered endpoint pair.
    ///
    /// Unique within a model by the one-edge-per-pair invariant, and stable
    /// regardless of which endpoint the wire record listed first.
    pub fn pair_id(u: &str, v: &str) -> String {
        if u <= v {
            format!("{u}--{v}")
        } else {
            format!("{v}--{u}")
        }
    }

    /// Returns `true` if `u` and `v` are this edge's endpoints, in either
    /// order.
    pub fn connects(&self, u: &str, v: &str) -> bool {
        (self.from == u && self.to == v) || (self.from == v && self.to == u)
    }
}

// ============================================================================
// Neighbor struct
// ============================================================================

/// One entry in a node's undirected adjacency list.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighbor {
    /// The adjacent node's id.
    pub id: String,
    /// Weight of the connecting edge.
    pub weight: f32,
    /// Id of the connecting edge.
    pub edge_id: String,
}

// ============================================================================
// GraphModel struct
// ============================================================================

/// The in-memory concept graph.
///
/// Wraps a petgraph `UnGraph` with an id lookup table. Mutation is
/// add-only: [`add_node`](GraphModel::add_node) is a no-op on an existing
/// id and [`add_edge`](GraphModel::add_edge) silently rejects anything that
/// would break a model invariant.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
    /// The underlying undirected graph.
    pub(crate) graph: UnGraph<Node, Edge>,
    /// Lookup table: node id → petgraph NodeIndex.
    pub(crate) node_indices: HashMap<String, NodeIndex>,
}

impl GraphModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if a node exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Gets a node by id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        let idx = self.get_index(id)?;
        self.graph.node_weight(idx)
    }

    /// Gets the petgraph index for a node id.
    pub fn get_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    /// Returns an iterator over all node ids.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.node_indices.keys().map(String::as_str)
    }

    /// Returns an iterator over all nodes.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Returns an iterator over all edges.
    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    /// Adds a node.
    ///
    /// If a node with the same id already exists, returns its index and
    /// leaves its attributes untouched. Never errors.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        if let Some(&existing_idx) = self.node_indices.get(&node.id) {
            return existing_idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_indices.insert(id, idx);
        idx
    }

    /// Checks if an edge exists between `u` and `v`, in either order.
    pub fn contains_edge(&self, u: &str, v: &str) -> bool {
        match (self.get_index(u), self.get_index(v)) {
            (Some(u_idx), Some(v_idx)) => self.graph.find_edge(u_idx, v_idx).is_some(),
            _ => false,
        }
    }

    /// Gets the edge between `u` and `v`, in either order.
    pub fn get_edge(&self, u: &str, v: &str) -> Option<&Edge> {
        let u_idx = self.get_index(u)?;
        let v_idx = self.get_index(v)?;
        let edge_idx = self.graph.find_edge(u_idx, v_idx)?;
        self.graph.edge_weight(edge_idx)
    }

    /// Adds an edge.
    ///
    /// Returns `false` without mutating the model when the edge is a
    /// self-loop, when either endpoint is absent, or when the unordered
    /// endpoint pair already has an edge. Returns `true` on insertion.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if edge.from == edge.to {
            return false;
        }
        let (Some(from_idx), Some(to_idx)) =
            (self.get_index(&edge.from), self.get_index(&edge.to))
        else {
            return false;
        };
        if self.graph.find_edge(from_idx, to_idx).is_some() {
            return false;
        }
        self.graph.add_edge(from_idx, to_idx, edge);
        true
    }

    /// Returns the undirected adjacency list of a node.
    ///
    /// An edge `{u, v}` yields `v` in `u`'s list and `u` in `v`'s list.
    /// An unknown id yields an empty list.
    pub fn neighbors(&self, id: &str) -> Vec<Neighbor> {
        let Some(idx) = self.get_index(id) else {
            return Vec::new();
        };
        self.graph
            .edges(idx)
            .map(|edge_ref| {
                let other = if edge_ref.source() == idx {
                    edge_ref.target()
                } else {
                    edge_ref.source()
                };
                let edge = edge_ref.weight();
                Neighbor {
                    id: self.graph[other].id.clone(),
                    weight: edge.weight,
                    edge_id: edge.id.clone(),
                }
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
