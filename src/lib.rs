//! Tributary - Git commit-graph visualization
//!
//! Tributary turns raw Git command output into a fully indexed commit DAG
//! and lays that DAG out in horizontal lanes for terminal or SVG
//! rendering.
//!
//! # Architecture
//!
//! Data flows linearly through the layers; each stage is a pure
//! transformation on immutable inputs:
//!
//! - [`git`] - Single interface for Git subprocess invocations
//! - [`parse`] - Delimited log and ref output → commits and refs
//! - [`core`] - Domain types, the indexed repository graph, traversal
//! - [`layout`] - Lane assignment, edge routing, queries, optimization
//! - [`render`] - Terminal and SVG renderers
//! - [`cli`] - Command-line interface layer
//! - [`ui`] - Output formatting utilities
//!
//! # Correctness Invariants
//!
//! 1. Every hash stored anywhere in a graph is 40 lowercase hex chars
//! 2. Graph construction and layout cannot fail; malformed input degrades
//!    to recoverable parse errors or dangling-pointer tolerance
//! 3. Identical inputs always produce identical visual graphs
//! 4. Lane permutation preserves topology: commits, edge endpoints, row
//!    and lane counts all survive [`layout::optimize`]

pub mod cli;
pub mod core;
pub mod git;
pub mod layout;
pub mod parse;
pub mod render;
pub mod ui;
