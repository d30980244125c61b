//! Common types and utilities shared by the csymtab crates.
//!
//! - Source spans (`Span`)
//! - Traversal limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "tests/span_tests.rs"]
mod span_tests;
