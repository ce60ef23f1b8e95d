//! Error types for noema-core

use thiserror::Error;

/// Result type alias for Noema operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Noema core crates.
///
/// The core distinguishes malformed requests (usage errors) from normal
/// negative outcomes: an unreachable target is *not* an error and is never
/// reported through this enum.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An id could not be resolved to an existing entity.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What kind of entity was looked up (e.g. "node").
        kind: String,
        /// The id that failed to resolve.
        id: String,
    },

    /// A path query named the same node as both source and target.
    #[error("source and target are the same node: {0}")]
    SameEndpoints(String),

    /// An internal invariant was violated. This indicates a bug in the
    /// caller's data feed or in the core itself, not bad user input.
    #[error("graph inconsistency: {0}")]
    Inconsistency(String),
}

impl Error {
    /// Creates a [`Error::NotFound`] error.
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Creates a [`Error::SameEndpoints`] error.
    pub fn same_endpoints(id: impl Into<String>) -> Self {
        Self::SameEndpoints(id.into())
    }

    /// Creates a [`Error::Inconsistency`] error.
    pub fn inconsistency(message: impl Into<String>) -> Self {
        Self::Inconsistency(message.into())
    }

    /// Returns `true` if this error reflects a malformed request rather
    /// than an internal failure.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::SameEndpoints(_))
    }
}
