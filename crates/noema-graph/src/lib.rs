#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Architecture
//!
//! ```text
//! backend response ──► fragment::GraphResponse ──► Fragment
//!                                                     │
//!                              merge::merge_fragment  ▼
//!                        GraphModel ◄─────────────────┘
//!                             │
//!                             ▼
//!              algorithms::find_widest_path ──► PathResult
//! ```
//!
//! The host owns the [`GraphModel`] and drives both entry points: it merges
//! freshly fetched fragments in place and, in path-finding mode, asks for
//! the route between two concepts whose weakest link is as strong as
//! possible. The model is purely synchronous and single-threaded; callers
//! must serialize merges relative to path queries.
//!
//! # Modules
//!
//! - [`types`]: [`GraphModel`], [`Node`], [`Edge`] — the undirected model
//! - [`algorithms`]: [`find_widest_path`] — maximum-bottleneck search
//! - [`merge`]: [`merge_fragment`] — incremental fragment integration
//! - [`fragment`]: wire-format records and the backend response envelope

pub mod algorithms;
pub mod fragment;
pub mod merge;
pub mod types;

mod proptests;

// Re-exports
pub use algorithms::{find_widest_path, PathResult};
pub use fragment::{Fragment, FragmentEdge, FragmentNode, GraphResponse};
pub use merge::{merge_fragment, MergeStats};
pub use types::{Edge, GraphModel, Neighbor, Node};
