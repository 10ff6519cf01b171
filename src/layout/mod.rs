//! layout
//!
//! Visual layout of the commit graph.
//!
//! # Architecture
//!
//! The layout engine walks the repository graph newest-first and assigns
//! every commit a `(row, lane)` coordinate, materializing edges with
//! routing hints as it goes:
//!
//! - [`engine`] - Lane assignment and edge materialization
//! - [`queries`] - Viewport extraction, bounding box, hit-testing, edge
//!   path generation (piecewise and SVG)
//! - [`optimize`] - Greedy adjacent-lane-swap crossing reduction
//!
//! # Coordinates
//!
//! Commit `row`/`lane` are indices (`usize`); row 0 is the newest commit,
//! lane 0 the visual mainline. Edge and path coordinates are `i64`
//! because an edge whose parent is outside the loaded commit set keeps
//! `to_row = -1`.
//!
//! # Invariants
//!
//! - Commits are stored in row order; edges in creation order
//! - `active_lanes_at_row[r]` is sorted and contains the lane of the
//!   commit at row `r`
//! - A visual graph is immutable once built; [`optimize`] returns a new
//!   graph

pub mod engine;
pub mod optimize;
pub mod queries;

use std::collections::HashMap;

use crate::core::types::CommitHash;

pub use engine::compute_layout;
pub use queries::{edge_path, edge_path_to_svg, BoundingBox, PathPoint, DEFAULT_HIT_TOLERANCE};

/// Placeholder row for an edge whose target commit is not loaded.
pub const UNRESOLVED_ROW: i64 = -1;

/// A ref materialized for rendering, with flags resolved against the
/// layout options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualRef {
    /// Short name (`main`, `origin/main`, `v1.0`)
    pub name: String,

    /// Full `refs/...` name
    pub full_name: String,

    /// Tag ref
    pub is_tag: bool,

    /// Remote-tracking branch
    pub is_remote: bool,

    /// Current HEAD branch
    pub is_head: bool,

    /// Matched a protected-branch pattern
    pub is_protected: bool,
}

/// A commit with its assigned position and render flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualCommit {
    /// The commit hash
    pub hash: CommitHash,

    /// Vertical position; 0 is the newest commit
    pub row: usize,

    /// Horizontal position; 0 is the leftmost lane
    pub lane: usize,

    /// Two or more parents
    pub is_merge: bool,

    /// At least one ref points here
    pub is_branch_tip: bool,

    /// No parents, or no parent in the loaded commit set
    pub is_root: bool,

    /// This commit is HEAD
    pub is_head: bool,

    /// Refs at this commit, materialized for rendering
    pub refs: Vec<VisualRef>,

    /// Ids of outgoing edges, in parent order
    pub edges: Vec<String>,
}

/// How an edge is routed between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeType {
    /// Same lane on both endpoints
    Straight,

    /// First-parent edge that changes lanes (the child started its own
    /// lane)
    Fork,

    /// Second-or-later parent of a merge commit
    Merge,
}

/// An edge from a commit to one of its parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualEdge {
    /// `"{from}-{to}-{parent_index}"`
    pub id: String,

    /// Child commit
    pub from: CommitHash,

    /// Parent commit (may be outside the loaded set)
    pub to: CommitHash,

    /// Row of the child
    pub from_row: i64,

    /// Lane of the child
    pub from_lane: i64,

    /// Row of the parent, or [`UNRESOLVED_ROW`] if not loaded
    pub to_row: i64,

    /// Lane the parent occupies (or will occupy)
    pub to_lane: i64,

    /// 0 for the first parent
    pub parent_index: usize,

    /// Routing hint
    pub edge_type: EdgeType,
}

/// The laid-out graph: commits in row order, edges in creation order,
/// plus lookup indices and per-row active-lane sets.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualGraph {
    /// Commits in row order (index == row)
    pub commits: Vec<VisualCommit>,

    /// Edges in creation order
    pub edges: Vec<VisualEdge>,

    /// Number of rows (== number of commits)
    pub total_rows: usize,

    /// Number of lanes ever allocated
    pub total_lanes: usize,

    commit_index_by_hash: HashMap<CommitHash, usize>,
    edge_index_by_id: HashMap<String, usize>,
    active_lanes_at_row: Vec<Vec<usize>>,
}

impl VisualGraph {
    /// Assemble a visual graph and build its indices.
    ///
    /// `commits` must already be in row order and `active_lanes_at_row`
    /// indexed by row.
    pub(crate) fn from_parts(
        commits: Vec<VisualCommit>,
        edges: Vec<VisualEdge>,
        total_lanes: usize,
        active_lanes_at_row: Vec<Vec<usize>>,
    ) -> Self {
        let commit_index_by_hash = commits
            .iter()
            .enumerate()
            .map(|(i, c)| (c.hash.clone(), i))
            .collect();
        let edge_index_by_id = edges
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Self {
            total_rows: commits.len(),
            total_lanes,
            commits,
            edges,
            commit_index_by_hash,
            edge_index_by_id,
            active_lanes_at_row,
        }
    }

    /// Look up a commit by hash.
    pub fn commit_by_hash(&self, hash: &CommitHash) -> Option<&VisualCommit> {
        self.commit_index_by_hash
            .get(hash)
            .and_then(|&i| self.commits.get(i))
    }

    /// The commit at a row, if the row is in range.
    pub fn commit_at_row(&self, row: usize) -> Option<&VisualCommit> {
        self.commits.get(row)
    }

    /// The row of a commit, if it is in the layout.
    pub fn row_of(&self, hash: &CommitHash) -> Option<usize> {
        self.commit_index_by_hash.get(hash).copied()
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: &str) -> Option<&VisualEdge> {
        self.edge_index_by_id
            .get(id)
            .and_then(|&i| self.edges.get(i))
    }

    /// Sorted lanes occupied at a row.
    pub fn active_lanes_at(&self, row: usize) -> &[usize] {
        self.active_lanes_at_row
            .get(row)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
