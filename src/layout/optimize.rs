//! layout::optimize
//!
//! Greedy crossing reduction by adjacent lane swaps.
//!
//! Counting crossings is `O(E²)` over edge pairs; the swap loop keeps any
//! adjacent-lane exchange that strictly lowers the count and stops after
//! a full pass without improvement. The heuristic is not optimal and may
//! leave crossings; renderers tolerate that.
//!
//! Two edges cross iff their row spans strictly overlap, their lane spans
//! strictly overlap, and their lane directions strictly oppose. Touching
//! spans do not count, and edges with zero row span (horizontal) or zero
//! lane span (vertical) never cross anything. Behavioral compatibility
//! matters more than geometric strictness here: snapshot outputs depend
//! on this exact predicate.

use super::{VisualEdge, VisualGraph};

impl VisualGraph {
    /// Reduce edge crossings by permuting lanes.
    ///
    /// Returns a new graph; the input is untouched. Re-running on the
    /// result is a fixed point: the greedy loop has already converged, so
    /// the identity mapping wins and the graph comes back unchanged.
    ///
    /// Preserves the commit set, every edge's `(from, to, parent_index)`,
    /// `total_rows`, and `total_lanes`.
    pub fn optimize_lanes(&self) -> VisualGraph {
        if self.total_lanes < 2 || self.edges.is_empty() {
            return self.clone();
        }

        let mut mapping: Vec<usize> = (0..self.total_lanes).collect();
        let mut best = count_crossings(&self.edges, &mapping);

        loop {
            let mut improved = false;
            for k in 0..self.total_lanes - 1 {
                mapping.swap(k, k + 1);
                let crossings = count_crossings(&self.edges, &mapping);
                if crossings < best {
                    best = crossings;
                    improved = true;
                } else {
                    mapping.swap(k, k + 1);
                }
            }
            if !improved {
                break;
            }
        }

        if mapping.iter().enumerate().all(|(lane, &mapped)| lane == mapped) {
            return self.clone();
        }
        self.apply_lane_mapping(&mapping)
    }

    /// Count crossings under a lane permutation.
    pub fn count_crossings(&self) -> usize {
        let identity: Vec<usize> = (0..self.total_lanes).collect();
        count_crossings(&self.edges, &identity)
    }

    fn apply_lane_mapping(&self, mapping: &[usize]) -> VisualGraph {
        let map = |lane: i64| -> i64 {
            mapping
                .get(lane as usize)
                .map(|&m| m as i64)
                .unwrap_or(lane)
        };

        let commits = self
            .commits
            .iter()
            .map(|c| {
                let mut c = c.clone();
                c.lane = mapping.get(c.lane).copied().unwrap_or(c.lane);
                c
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .map(|e| {
                let mut e = e.clone();
                e.from_lane = map(e.from_lane);
                e.to_lane = map(e.to_lane);
                e
            })
            .collect();

        let active_lanes = (0..self.total_rows)
            .map(|row| {
                let mut lanes: Vec<usize> = self
                    .active_lanes_at(row)
                    .iter()
                    .map(|&l| mapping.get(l).copied().unwrap_or(l))
                    .collect();
                lanes.sort_unstable();
                lanes
            })
            .collect();

        VisualGraph::from_parts(commits, edges, self.total_lanes, active_lanes)
    }
}

fn count_crossings(edges: &[VisualEdge], mapping: &[usize]) -> usize {
    let map = |lane: i64| -> i64 {
        mapping
            .get(lane as usize)
            .map(|&m| m as i64)
            .unwrap_or(lane)
    };
    // (row span, lane span, direction) per edge under the mapping.
    let geometry: Vec<(i64, i64, i64, i64, i64)> = edges
        .iter()
        .map(|e| {
            let (from_lane, to_lane) = (map(e.from_lane), map(e.to_lane));
            (
                e.from_row.min(e.to_row),
                e.from_row.max(e.to_row),
                from_lane.min(to_lane),
                from_lane.max(to_lane),
                (to_lane - from_lane).signum(),
            )
        })
        .collect();

    let mut crossings = 0;
    for i in 0..geometry.len() {
        for j in i + 1..geometry.len() {
            if segments_cross(geometry[i], geometry[j]) {
                crossings += 1;
            }
        }
    }
    crossings
}

fn segments_cross(
    a: (i64, i64, i64, i64, i64),
    b: (i64, i64, i64, i64, i64),
) -> bool {
    let (a_row_lo, a_row_hi, a_lane_lo, a_lane_hi, a_dir) = a;
    let (b_row_lo, b_row_hi, b_lane_lo, b_lane_hi, b_dir) = b;

    // Horizontal-only and vertical-only segments never cross.
    if a_row_lo == a_row_hi || b_row_lo == b_row_hi {
        return false;
    }
    if a_lane_lo == a_lane_hi || b_lane_lo == b_lane_hi {
        return false;
    }
    // Strict overlap on both axes; touching spans do not cross.
    if !(a_row_lo < b_row_hi && b_row_lo < a_row_hi) {
        return false;
    }
    if !(a_lane_lo < b_lane_hi && b_lane_lo < a_lane_hi) {
        return false;
    }
    // One leans left-to-right, the other right-to-left.
    a_dir * b_dir == -1
}
