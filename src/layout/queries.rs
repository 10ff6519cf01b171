//! layout::queries
//!
//! Read-side queries over a laid-out graph: viewport extraction, bounding
//! boxes, hit-testing, and edge path generation for renderers.
//!
//! Path geometry works in `(row, lane)` space; [`edge_path_to_svg`] maps
//! it to pixels, centering each point in its cell.

use super::{EdgeType, VisualCommit, VisualEdge, VisualGraph};

/// Default lane tolerance for [`VisualGraph::find_commit_at_position`].
pub const DEFAULT_HIT_TOLERANCE: f64 = 0.5;

/// A point on an edge path, in graph coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPoint {
    /// Row (may be -1 for an unresolved edge target)
    pub row: i64,

    /// Lane
    pub lane: i64,
}

/// Componentwise extent of a set of commits and edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_row: i64,
    pub max_row: i64,
    pub min_lane: i64,
    pub max_lane: i64,
}

impl BoundingBox {
    /// Compute the extent of the given commits and edges.
    ///
    /// An empty commit set yields the all-zero box regardless of edges.
    pub fn compute(commits: &[&VisualCommit], edges: &[&VisualEdge]) -> Self {
        let Some(first) = commits.first() else {
            return Self::default();
        };

        let mut bbox = Self {
            min_row: first.row as i64,
            max_row: first.row as i64,
            min_lane: first.lane as i64,
            max_lane: first.lane as i64,
        };
        for commit in commits {
            bbox.expand(commit.row as i64, commit.lane as i64);
        }
        for edge in edges {
            bbox.expand(edge.from_row, edge.from_lane);
            bbox.expand(edge.to_row, edge.to_lane);
        }
        bbox
    }

    fn expand(&mut self, row: i64, lane: i64) {
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
        self.min_lane = self.min_lane.min(lane);
        self.max_lane = self.max_lane.max(lane);
    }
}

impl VisualGraph {
    /// Commits whose row falls in `[start, min(end, total_rows - 1)]`.
    pub fn visible_commits(&self, start: usize, end: usize) -> Vec<&VisualCommit> {
        if self.commits.is_empty() || start > end {
            return Vec::new();
        }
        let end = end.min(self.total_rows.saturating_sub(1));
        if start > end {
            return Vec::new();
        }
        self.commits[start..=end].iter().collect()
    }

    /// Edges whose row span overlaps `[start, end]`.
    ///
    /// The span is `[min(from_row, to_row), max(from_row, to_row)]`, so an
    /// edge with an unresolved target (`to_row = -1`) spans up to its
    /// child's row.
    pub fn visible_edges(&self, start: usize, end: usize) -> Vec<&VisualEdge> {
        let (start, end) = (start as i64, end as i64);
        self.edges
            .iter()
            .filter(|e| {
                let lo = e.from_row.min(e.to_row);
                let hi = e.from_row.max(e.to_row);
                lo <= end && hi >= start
            })
            .collect()
    }

    /// The commit rendered at `(row, lane)`, within `tolerance` lanes.
    ///
    /// Callers with no better idea pass [`DEFAULT_HIT_TOLERANCE`].
    pub fn find_commit_at_position(
        &self,
        row: usize,
        lane: f64,
        tolerance: f64,
    ) -> Option<&VisualCommit> {
        let commit = self.commit_at_row(row)?;
        if (commit.lane as f64 - lane).abs() <= tolerance {
            Some(commit)
        } else {
            None
        }
    }
}

/// The piecewise-linear path of an edge, in graph coordinates.
///
/// Same-lane edges are a straight 2-point segment. Merge edges go
/// horizontal first at the child's row, then drop: a 3-point L. Fork
/// edges descend in the child's lane to a midpoint row, cross over, and
/// descend in the parent's lane: a 4-point Z.
pub fn edge_path(edge: &VisualEdge) -> Vec<PathPoint> {
    let from = PathPoint {
        row: edge.from_row,
        lane: edge.from_lane,
    };
    let to = PathPoint {
        row: edge.to_row,
        lane: edge.to_lane,
    };

    if edge.from_lane == edge.to_lane {
        return vec![from, to];
    }

    match edge.edge_type {
        EdgeType::Merge => vec![
            from,
            PathPoint {
                row: edge.from_row,
                lane: edge.to_lane,
            },
            to,
        ],
        EdgeType::Fork | EdgeType::Straight => {
            let mid_row = (edge.from_row + edge.to_row).div_euclid(2);
            vec![
                from,
                PathPoint {
                    row: mid_row,
                    lane: edge.from_lane,
                },
                PathPoint {
                    row: mid_row,
                    lane: edge.to_lane,
                },
                to,
            ]
        }
    }
}

/// Render a path as an SVG path attribute string.
///
/// Each point maps to the center of its `(row, lane)` cell. Straight mode
/// emits `M … L … L …`; curve mode (with at least 3 points) smooths every
/// interior corner with a quadratic segment whose control is the corner
/// itself and whose anchor is the midpoint to the following point, ending
/// with a straight `L` to the final point.
pub fn edge_path_to_svg(
    points: &[PathPoint],
    row_height: f64,
    lane_width: f64,
    use_curves: bool,
) -> String {
    let coord = |p: &PathPoint| {
        (
            p.lane as f64 * lane_width + lane_width / 2.0,
            p.row as f64 * row_height + row_height / 2.0,
        )
    };

    let Some(first) = points.first() else {
        return String::new();
    };
    let (x0, y0) = coord(first);
    let mut path = format!("M {x0} {y0}");

    if use_curves && points.len() >= 3 {
        for i in 1..points.len() - 1 {
            let (cx, cy) = coord(&points[i]);
            let (nx, ny) = coord(&points[i + 1]);
            let (mx, my) = ((cx + nx) / 2.0, (cy + ny) / 2.0);
            path.push_str(&format!(" Q {cx} {cy} {mx} {my}"));
        }
        if let Some(last) = points.last() {
            let (x, y) = coord(last);
            path.push_str(&format!(" L {x} {y}"));
        }
    } else {
        for point in &points[1..] {
            let (x, y) = coord(point);
            path.push_str(&format!(" L {x} {y}"));
        }
    }

    path
}
