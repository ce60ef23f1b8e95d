//! Property-based tests for the graph core.
