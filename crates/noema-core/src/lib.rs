#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Noema Core — shared errors for the concept-graph crates.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias

pub mod error;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
