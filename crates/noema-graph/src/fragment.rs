//! Wire-format fragment records.
//!
//! Expansion requests come back from the backend as
//!
//! ```json
//! {
//!   "code": 200,
//!   "msg": "ok",
//!   "nodes": [{"name": "entropy", "domain": "thermodynamics"}],
//!   "links": [{"source": "entropy", "target": "information",
//!              "relation": "quantifies uncertainty", "strength": 4}]
//! }
//! ```
//!
//! where a node's `name` doubles as its id and a link's `strength` is the
//! edge weight. [`GraphResponse`] models that envelope and lowers it to a
//! [`Fragment`], the shape [`merge_fragment`](crate::merge::merge_fragment)
//! consumes.
//!
//! Record fields are deliberately permissive (`Option` everywhere): a
//! malformed entry survives deserialization and is rejected by the merger,
//! which can count and log it, instead of failing the whole payload in
//! serde.

use crate::types::{Edge, Node};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weight assigned to links that arrive without a strength score.
const DEFAULT_WEIGHT: f32 = 1.0;

// ============================================================================
// Fragment
// ============================================================================

/// A partial node/edge set to be spliced into a [`GraphModel`].
///
/// [`GraphModel`]: crate::types::GraphModel
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Node records, processed before edges.
    #[serde(default)]
    pub nodes: Vec<FragmentNode>,
    /// Edge records.
    #[serde(default)]
    pub edges: Vec<FragmentEdge>,
}

impl Fragment {
    /// Creates an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node record.
    pub fn with_node(mut self, node: FragmentNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds an edge record.
    pub fn with_edge(mut self, edge: FragmentEdge) -> Self {
        self.edges.push(edge);
        self
    }
}

// ============================================================================
// FragmentNode
// ============================================================================

/// A node record inside a fragment.
///
/// Fields not recognized here are collected into `extra` and carried over
/// as node metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FragmentNode {
    /// The node id. A record without one is malformed.
    #[serde(default)]
    pub id: Option<String>,
    /// Display label; falls back to the id.
    #[serde(default)]
    pub name: Option<String>,
    /// Subject domain.
    #[serde(default)]
    pub domain: Option<String>,
    /// Unrecognized attributes, preserved verbatim.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl FragmentNode {
    /// Creates a node record with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the subject domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Converts to a model [`Node`], or `None` if the record has no usable
    /// id.
    pub fn to_node(&self) -> Option<Node> {
        let id = self.id.as_deref().filter(|id| !id.is_empty())?;
        let mut node = Node::new(id);
        if let Some(ref name) = self.name {
            node = node.with_name(name.clone());
        }
        if let Some(ref domain) = self.domain {
            node = node.with_domain(domain.clone());
        }
        for (key, value) in &self.extra {
            node = node.with_metadata(key.clone(), value.clone());
        }
        Some(node)
    }
}

// ============================================================================
// FragmentEdge
// ============================================================================

/// An edge record inside a fragment.
///
/// Accepts the backend's `strength` field name for the weight. Fields not
/// recognized here are collected into `extra` and carried over as edge
/// metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FragmentEdge {
    /// One endpoint's node id. A record missing either endpoint is
    /// malformed.
    #[serde(default)]
    pub source: Option<String>,
    /// The other endpoint's node id.
    #[serde(default)]
    pub target: Option<String>,
    /// Relation strength; the backend scores 1-5.
    #[serde(default, alias = "strength")]
    pub weight: Option<f32>,
    /// Free-text description of the relation.
    #[serde(default)]
    pub relation: Option<String>,
    /// Optional explicit edge id; synthesized from the endpoint pair when
    /// absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Unrecognized attributes, preserved verbatim.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl FragmentEdge {
    /// Creates an edge record between the given endpoints.
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f32) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            weight: Some(weight),
            ..Self::default()
        }
    }

    /// Sets an explicit edge id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the relation text.
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    /// Converts to a model [`Edge`], or `None` if either endpoint id is
    /// missing or empty.
    pub fn to_edge(&self) -> Option<Edge> {
        let from = self.source.as_deref().filter(|s| !s.is_empty())?;
        let to = self.target.as_deref().filter(|s| !s.is_empty())?;
        let mut edge = Edge::new(from, to, self.weight.unwrap_or(DEFAULT_WEIGHT));
        if let Some(ref id) = self.id {
            edge = edge.with_id(id.clone());
        }
        if let Some(ref relation) = self.relation {
            edge = edge.with_relation(relation.clone());
        }
        for (key, value) in &self.extra {
            edge = edge.with_metadata(key.clone(), value.clone());
        }
        Some(edge)
    }
}

// ============================================================================
// GraphResponse
// ============================================================================

/// The backend's graph payload envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphResponse {
    /// Backend status code; 200 on success.
    #[serde(default)]
    pub code: i32,
    /// Human-readable status message.
    #[serde(default)]
    pub msg: String,
    /// Node records. Each node's `name` doubles as its id.
    #[serde(default)]
    pub nodes: Vec<ResponseNode>,
    /// Link records.
    #[serde(default, alias = "edges")]
    pub links: Vec<FragmentEdge>,
}

/// A node record as the backend ships it.
#[derive(Clone, Debug, Deserialize)]
pub struct ResponseNode {
    /// Concept name, reused as the node id.
    #[serde(default)]
    pub name: Option<String>,
    /// Subject domain.
    #[serde(default)]
    pub domain: Option<String>,
    /// Unrecognized attributes, preserved verbatim.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl GraphResponse {
    /// Returns `true` if the backend reported success.
    pub fn is_success(&self) -> bool {
        self.code == 200
    }

    /// Lowers the envelope into a [`Fragment`], mapping each node's `name`
    /// to its id.
    pub fn into_fragment(self) -> Fragment {
        Fragment {
            nodes: self
                .nodes
                .into_iter()
                .map(|node| FragmentNode {
                    id: node.name.clone(),
                    name: node.name,
                    domain: node.domain,
                    extra: node.extra,
                })
                .collect(),
            edges: self.links,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // FragmentNode tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_node_record_to_node() {
        let record = FragmentNode::new("entropy")
            .with_name("Entropy")
            .with_domain("thermodynamics");
        let node = record.to_node().unwrap();

        assert_eq!(node.id, "entropy");
        assert_eq!(node.name, "Entropy");
        assert_eq!(node.domain, Some("thermodynamics".to_string()));
    }

    #[test]
    fn test_node_record_without_id_is_rejected() {
        let record = FragmentNode::default();
        assert!(record.to_node().is_none());

        let record = FragmentNode {
            id: Some(String::new()),
            ..FragmentNode::default()
        };
        assert!(record.to_node().is_none());
    }

    #[test]
    fn test_node_record_extra_becomes_metadata() {
        let json = r#"{"id": "entropy", "definition": "a measure of disorder"}"#;
        let record: FragmentNode = serde_json::from_str(json).unwrap();
        let node = record.to_node().unwrap();

        assert_eq!(
            node.metadata.get("definition").and_then(|v| v.as_str()),
            Some("a measure of disorder")
        );
    }

    // ------------------------------------------------------------------------
    // FragmentEdge tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_edge_record_to_edge() {
        let record = FragmentEdge::new("a", "b", 4.0).with_relation("related");
        let edge = record.to_edge().unwrap();

        assert_eq!(edge.from, "a");
        assert_eq!(edge.to, "b");
        assert_eq!(edge.weight, 4.0);
        assert_eq!(edge.relation, Some("related".to_string()));
        // No explicit id: synthesized from the sorted endpoint pair.
        assert_eq!(edge.id, "a--b");
    }

    #[test]
    fn test_edge_record_missing_endpoint_is_rejected() {
        let record = FragmentEdge {
            source: Some("a".to_string()),
            ..FragmentEdge::default()
        };
        assert!(record.to_edge().is_none());

        let record = FragmentEdge {
            source: Some("a".to_string()),
            target: Some(String::new()),
            ..FragmentEdge::default()
        };
        assert!(record.to_edge().is_none());
    }

    #[test]
    fn test_edge_record_strength_alias() {
        let json = r#"{"source": "a", "target": "b", "strength": 3}"#;
        let record: FragmentEdge = serde_json::from_str(json).unwrap();
        assert_eq!(record.weight, Some(3.0));
    }

    #[test]
    fn test_edge_record_missing_weight_defaults() {
        let json = r#"{"source": "a", "target": "b"}"#;
        let record: FragmentEdge = serde_json::from_str(json).unwrap();
        let edge = record.to_edge().unwrap();
        assert_eq!(edge.weight, 1.0);
    }

    #[test]
    fn test_edge_record_explicit_id_wins() {
        let record = FragmentEdge::new("a", "b", 2.0).with_id("e42");
        assert_eq!(record.to_edge().unwrap().id, "e42");
    }

    // ------------------------------------------------------------------------
    // Fragment tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_fragment_builder() {
        let fragment = Fragment::new()
            .with_node(FragmentNode::new("a"))
            .with_node(FragmentNode::new("b"))
            .with_edge(FragmentEdge::new("a", "b", 2.0));

        assert_eq!(fragment.nodes.len(), 2);
        assert_eq!(fragment.edges.len(), 1);
    }

    #[test]
    fn test_fragment_deserializes_with_missing_sections() {
        let fragment: Fragment = serde_json::from_str("{}").unwrap();
        assert!(fragment.nodes.is_empty());
        assert!(fragment.edges.is_empty());
    }

    // ------------------------------------------------------------------------
    // GraphResponse tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_response_into_fragment() {
        let json = r#"{
            "code": 200,
            "msg": "ok",
            "nodes": [
                {"name": "entropy", "domain": "thermodynamics"},
                {"name": "information", "domain": "mathematics"}
            ],
            "links": [
                {"source": "entropy", "target": "information",
                 "relation": "quantifies uncertainty", "strength": 4}
            ]
        }"#;
        let response: GraphResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_success());

        let fragment = response.into_fragment();
        assert_eq!(fragment.nodes.len(), 2);
        // name doubles as the id
        assert_eq!(fragment.nodes[0].id, Some("entropy".to_string()));
        assert_eq!(fragment.nodes[0].name, Some("entropy".to_string()));

        let edge = fragment.edges[0].to_edge().unwrap();
        assert_eq!(edge.weight, 4.0);
        assert_eq!(edge.relation, Some("quantifies uncertainty".to_string()));
    }

    #[test]
    fn test_response_failure_envelope() {
        let json = r#"{"code": 400, "msg": "invalid concept", "nodes": [], "links": []}"#;
        let response: GraphResponse = serde_json::from_str(json).unwrap();
        assert!(!response.is_success());
        assert!(response.into_fragment().nodes.is_empty());
    }

    #[test]
    fn test_response_tolerates_extra_fields() {
        // The backend also ships reasoning traces; they are not fragment data.
        let json = r#"{
            "code": 200, "msg": "ok",
            "nodes": [{"name": "a", "definition": "first"}],
            "links": [],
            "reasoning": ["step one"],
            "cleaned_relations": []
        }"#;
        let response: GraphResponse = serde_json::from_str(json).unwrap();
        let fragment = response.into_fragment();
        let node = fragment.nodes[0].to_node().unwrap();
        assert_eq!(
            node.metadata.get("definition").and_then(|v| v.as_str()),
            Some("first")
        );
    }
}
