//! # Gridcast Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Map fixtures
//! - Maze topology checks (spanning tree, wall symmetry)
//! - Determinism harness
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod determinism;
pub mod fixtures;
pub mod strategies;
pub mod topology;

/// Re-export proptest for convenience.
pub use proptest;
