//! Incremental fragment integration.
//!
//! Double-click expansion fetches a partial node/edge set that has to be
//! spliced into the live graph without duplicating what is already on
//! screen and without ever creating a dangling edge. The merge runs in two
//! phases:
//!
//! 1. **Nodes** — records already present (by id) are skipped so existing
//!    attributes are never overwritten; records without an id are dropped.
//! 2. **Edges** — processed only after every fragment node is in the
//!    model, so an edge may reference nodes added earlier in the same
//!    call. Dangling endpoints and duplicate unordered pairs are skipped;
//!    the first edge processed for a pair wins, even when a later record
//!    carries a different weight or relation.
//!
//! Merging is idempotent and never removes anything. Recoverable problems
//! are counted in [`MergeStats`] and logged; the only hard failure is an
//! internal inconsistency, which indicates a bug rather than bad input.

use crate::fragment::Fragment;
use crate::types::GraphModel;
use noema_core::{Error, Result};

// ============================================================================
// MergeStats
// ============================================================================

/// Statistics from one merge call.
#[derive(Clone, Debug, Default)]
pub struct MergeStats {
    /// Nodes added to the model.
    pub nodes_added: usize,
    /// Node records skipped because the id was already present.
    pub nodes_skipped: usize,
    /// Edges added to the model.
    pub edges_added: usize,
    /// Edge records dropped because the unordered pair was already
    /// connected.
    pub duplicate_edges: usize,
    /// Edge records dropped because an endpoint was absent, as
    /// `"from -- to"` strings.
    pub dangling_refs: Vec<String>,
    /// Records dropped for missing or unusable required fields.
    pub malformed_records: usize,
}

// ============================================================================
// merge_fragment
// ============================================================================

/// Merges a fragment into the model in place.
///
/// See the module docs for the exact skip rules. Returns statistics about
/// what was added and what was dropped; the error path is reserved for
/// internal inconsistencies and is never triggered by malformed input.
pub fn merge_fragment(model: &mut GraphModel, fragment: &Fragment) -> Result<MergeStats> {
    let mut stats = MergeStats::default();

    // ================================================================
    // Phase 1: nodes
    // ================================================================
    for record in &fragment.nodes {
        let Some(node) = record.to_node() else {
            log::warn!("dropping fragment node without id");
            stats.malformed_records += 1;
            continue;
        };
        if model.contains_node(&node.id) {
            stats.nodes_skipped += 1;
            continue;
        }
        model.add_node(node);
        stats.nodes_added += 1;
    }

    // ================================================================
    // Phase 2: edges
    // ================================================================
    for record in &fragment.edges {
        let Some(edge) = record.to_edge() else {
            log::warn!("dropping fragment edge without both endpoints");
            stats.malformed_records += 1;
            continue;
        };
        if edge.from == edge.to {
            log::warn!("dropping self-loop fragment edge at {}", edge.from);
            stats.malformed_records += 1;
            continue;
        }
        if !model.contains_node(&edge.from) || !model.contains_node(&edge.to) {
            log::debug!("dropping dangling fragment edge {} -- {}", edge.from, edge.to);
            stats.dangling_refs.push(format!("{} -- {}", edge.from, edge.to));
            continue;
        }
        if model.contains_edge(&edge.from, &edge.to) {
            stats.duplicate_edges += 1;
            continue;
        }
        // All skip rules passed; a rejection here means the model and the
        // checks above disagree, which is a bug, not bad input.
        let (from, to) = (edge.from.clone(), edge.to.clone());
        if !model.add_edge(edge) {
            return Err(Error::inconsistency(format!(
                "edge {from} -- {to} rejected after endpoint and duplicate checks passed"
            )));
        }
        stats.edges_added += 1;
    }

    log::debug!(
        "merged fragment: +{} nodes, +{} edges, {} duplicates, {} dangling, {} malformed",
        stats.nodes_added,
        stats.edges_added,
        stats.duplicate_edges,
        stats.dangling_refs.len(),
        stats.malformed_records
    );

    Ok(stats)
}

// ============================================================================
// Tests
// ============================================================================
