//! layout::engine
//!
//! Lane assignment and edge materialization.
//!
//! # Algorithm
//!
//! Commits are visited in reverse topological order (newest first, row 0
//! downward). A commit takes the lane a child reserved for it, or
//! allocates the lowest free lane. Its first parent inherits the lane
//! (mainline continuation); each later parent of a merge gets a fresh
//! lane. Lanes are freed conservatively: only when no child stayed in the
//! lane, no pending parent reservation points at it, and it is not lane 0
//! (the visual mainline). The freeing policy may keep lanes alive longer
//! than strictly necessary, but it guarantees no edge is ever truncated.
//!
//! Edges are created with `to_row` unresolved; a second pass fills it in
//! from the final row index. Edges to commits outside the loaded set keep
//! [`UNRESOLVED_ROW`].

use std::collections::HashMap;

use crate::core::commit::Ref;
use crate::core::config::{GraphOptions, ProtectedPatterns};
use crate::core::graph::RepoGraph;
use crate::core::types::CommitHash;

use super::{EdgeType, VisualCommit, VisualEdge, VisualGraph, VisualRef, UNRESOLVED_ROW};

/// Lay out a repository graph.
///
/// Deterministic: identical inputs produce identical visual graphs.
///
/// # Example
///
/// ```
/// use tributary::core::graph::RepoGraph;
/// use tributary::core::config::GraphOptions;
/// use tributary::layout::compute_layout;
///
/// let graph = RepoGraph::build(vec![], vec![], None, None);
/// let visual = compute_layout(&graph, &GraphOptions::default());
/// assert_eq!(visual.total_rows, 0);
/// ```
pub fn compute_layout(graph: &RepoGraph, options: &GraphOptions) -> VisualGraph {
    let patterns = options.protected_patterns();
    let mut lanes = LaneState::default();
    let mut commits = Vec::with_capacity(graph.len());
    let mut edges = Vec::new();
    let mut active_lanes_at_row = Vec::with_capacity(graph.len());

    let newest_first = graph
        .topological_order()
        .iter()
        .filter_map(|hash| graph.commit(hash))
        .rev();

    for (row, commit) in newest_first.enumerate() {
        let hash = &commit.hash;

        // Take the lane a child reserved, or open a new one.
        let lane = match lanes.lane_by_commit.get(hash) {
            Some(&lane) => lane,
            None => {
                let lane = lanes.allocate();
                lanes.lane_by_commit.insert(hash.clone(), lane);
                lane
            }
        };
        lanes.active_lanes.insert(lane, hash.clone());

        let refs: Vec<VisualRef> = graph
            .refs_at(hash)
            .iter()
            .map(|r| materialize_ref(r, &patterns))
            .collect();

        let mut edge_ids = Vec::with_capacity(commit.parents.len());
        for (parent_index, parent) in commit.parents.iter().enumerate() {
            let parent_lane = match lanes.lane_by_commit.get(parent) {
                Some(&reserved) => reserved,
                None if parent_index == 0 => {
                    // Mainline continuation: the first parent inherits
                    // this commit's lane.
                    lanes.lane_by_commit.insert(parent.clone(), lane);
                    lane
                }
                None => {
                    let fresh = lanes.allocate();
                    lanes.lane_by_commit.insert(parent.clone(), fresh);
                    fresh
                }
            };
            // The pending parent keeps its lane active until placed.
            lanes.active_lanes.insert(parent_lane, parent.clone());

            let edge_type = if commit.parents.len() >= 2 && parent_index >= 1 {
                EdgeType::Merge
            } else if lane != parent_lane {
                EdgeType::Fork
            } else {
                EdgeType::Straight
            };
            let id = format!("{hash}-{parent}-{parent_index}");
            edge_ids.push(id.clone());
            edges.push(VisualEdge {
                id,
                from: hash.clone(),
                to: parent.clone(),
                from_row: row as i64,
                from_lane: lane as i64,
                to_row: UNRESOLVED_ROW,
                to_lane: parent_lane as i64,
                parent_index,
                edge_type,
            });
        }

        // Free the lane unless a child stayed in it, a pending parent
        // reservation points back at it, or it is the mainline.
        let child_kept_lane = graph
            .children_of(hash)
            .iter()
            .any(|child| lanes.lane_by_commit.get(child) == Some(&lane));
        let reserved_below = lanes
            .active_lanes
            .get(&lane)
            .is_some_and(|occupant| occupant != hash);
        if !child_kept_lane && !reserved_below && lane > 0 {
            lanes.free_lanes.push(lane);
        }

        let mut snapshot: Vec<usize> = lanes.active_lanes.keys().copied().collect();
        snapshot.sort_unstable();
        active_lanes_at_row.push(snapshot);

        if lanes.active_lanes.get(&lane) == Some(hash) {
            lanes.active_lanes.remove(&lane);
        }

        let is_root = commit.parents.is_empty()
            || commit.parents.iter().all(|p| !graph.contains(p));
        commits.push(VisualCommit {
            hash: hash.clone(),
            row,
            lane,
            is_merge: commit.is_merge(),
            is_branch_tip: !refs.is_empty(),
            is_root,
            is_head: graph.head() == Some(hash),
            refs,
            edges: edge_ids,
        });
    }

    // Second pass: resolve target rows now that every commit is placed.
    let row_by_hash: HashMap<&CommitHash, i64> = commits
        .iter()
        .map(|c| (&c.hash, c.row as i64))
        .collect();
    for edge in &mut edges {
        if let Some(&row) = row_by_hash.get(&edge.to) {
            edge.to_row = row;
        }
    }

    VisualGraph::from_parts(commits, edges, lanes.lane_count, active_lanes_at_row)
}

/// Mutable lane bookkeeping for one layout pass.
#[derive(Debug, Default)]
struct LaneState {
    /// Reservations made by children, plus final assignments
    lane_by_commit: HashMap<CommitHash, usize>,

    /// Lane → the commit currently holding it (placed or pending)
    active_lanes: HashMap<usize, CommitHash>,

    /// Lanes available for reuse
    free_lanes: Vec<usize>,

    /// Lanes ever opened; also the next fresh lane number
    lane_count: usize,
}

impl LaneState {
    /// Return the lowest free lane, or open a new one.
    fn allocate(&mut self) -> usize {
        if !self.free_lanes.is_empty() {
            self.free_lanes.sort_unstable();
            return self.free_lanes.remove(0);
        }
        let lane = self.lane_count;
        self.lane_count += 1;
        lane
    }
}

fn materialize_ref(r: &Ref, patterns: &ProtectedPatterns) -> VisualRef {
    let is_tag = r.is_tag();
    VisualRef {
        name: r.name.clone(),
        full_name: r.full_name.clone(),
        is_tag,
        is_remote: r.is_remote_branch(),
        is_head: r.is_head(),
        is_protected: !is_tag && (r.is_protected() || patterns.matches(&r.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commit::{Commit, RefKind};
    use crate::core::types::Identity;
    use chrono::DateTime;

    fn hash(c: char) -> CommitHash {
        CommitHash::new(c.to_string().repeat(40)).unwrap()
    }

    fn commit(h: char, parents: &[char]) -> Commit {
        let date = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
        Commit {
            hash: hash(h),
            parents: parents.iter().map(|&p| hash(p)).collect(),
            author: Identity::new("a", "a@example.com"),
            committer: Identity::new("c", "c@example.com"),
            authored_at: date,
            committed_at: date,
            subject: format!("commit {h}"),
            body: String::new(),
        }
    }

    fn layout(commits: Vec<Commit>, head: Option<char>) -> VisualGraph {
        let head = head.map(hash);
        let graph = RepoGraph::build(commits, vec![], head, None);
        compute_layout(&graph, &GraphOptions::default())
    }

    #[test]
    fn empty_graph() {
        let visual = layout(vec![], None);
        assert_eq!(visual.total_rows, 0);
        assert_eq!(visual.total_lanes, 0);
        assert!(visual.commits.is_empty());
        assert!(visual.edges.is_empty());
    }

    #[test]
    fn linear_history_single_lane() {
        let visual = layout(
            vec![commit('a', &[]), commit('b', &['a']), commit('c', &['b'])],
            Some('c'),
        );

        assert_eq!(visual.total_rows, 3);
        assert_eq!(visual.total_lanes, 1);

        // Newest at row 0.
        assert_eq!(visual.commits[0].hash, hash('c'));
        assert_eq!(visual.commits[2].hash, hash('a'));
        assert!(visual.commits.iter().all(|c| c.lane == 0));
        assert!(visual
            .edges
            .iter()
            .all(|e| e.edge_type == EdgeType::Straight));
        assert_eq!(visual.edges.len(), 2);
    }

    #[test]
    fn head_and_root_flags() {
        let visual = layout(vec![commit('a', &[]), commit('b', &['a'])], Some('b'));
        assert!(visual.commits[0].is_head);
        assert!(!visual.commits[0].is_root);
        assert!(visual.commits[1].is_root);
    }

    #[test]
    fn fork_takes_second_lane() {
        let visual = layout(
            vec![commit('a', &[]), commit('b', &['a']), commit('c', &['a'])],
            Some('b'),
        );

        assert_eq!(visual.total_lanes, 2);

        // Both edges end on a's lane; exactly one changed lanes.
        let to_lanes: Vec<i64> = visual.edges.iter().map(|e| e.to_lane).collect();
        assert!(to_lanes.iter().all(|&l| l == to_lanes[0]));
        let forks = visual
            .edges
            .iter()
            .filter(|e| e.edge_type == EdgeType::Fork)
            .count();
        assert_eq!(forks, 1);
    }

    #[test]
    fn merge_edge_typing() {
        let visual = layout(
            vec![
                commit('a', &[]),
                commit('b', &['a']),
                commit('c', &['a']),
                commit('d', &['b', 'c']),
            ],
            Some('d'),
        );

        let d = visual.commit_by_hash(&hash('d')).unwrap();
        assert!(d.is_merge);
        assert_eq!(d.edges.len(), 2);
        assert_eq!(visual.edges.len(), 4);

        let to_c = visual
            .edges
            .iter()
            .find(|e| e.from == hash('d') && e.to == hash('c'))
            .unwrap();
        assert_eq!(to_c.edge_type, EdgeType::Merge);
        assert_eq!(to_c.parent_index, 1);

        let to_b = visual
            .edges
            .iter()
            .find(|e| e.from == hash('d') && e.to == hash('b'))
            .unwrap();
        assert_eq!(to_b.parent_index, 0);
    }

    #[test]
    fn octopus_merge_edges() {
        let visual = layout(
            vec![
                commit('a', &[]),
                commit('b', &[]),
                commit('c', &[]),
                commit('d', &['a', 'b', 'c']),
            ],
            Some('d'),
        );

        let d = visual.commit_by_hash(&hash('d')).unwrap();
        assert_eq!(d.edges.len(), 3);
        let merge_edges = visual
            .edges
            .iter()
            .filter(|e| e.edge_type == EdgeType::Merge)
            .count();
        assert_eq!(merge_edges, 2);
        let indices: Vec<usize> = d
            .edges
            .iter()
            .map(|id| visual.edge(id).unwrap().parent_index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn unresolved_parent_keeps_placeholder_row() {
        // b's parent a is not loaded.
        let visual = layout(vec![commit('b', &['a']), commit('c', &['b'])], Some('c'));

        let dangling = visual
            .edges
            .iter()
            .find(|e| e.to == hash('a'))
            .unwrap();
        assert_eq!(dangling.to_row, UNRESOLVED_ROW);

        let resolved = visual
            .edges
            .iter()
            .find(|e| e.to == hash('b'))
            .unwrap();
        assert_eq!(resolved.to_row, 1);
    }

    #[test]
    fn edge_rows_match_commit_rows() {
        let visual = layout(
            vec![
                commit('a', &[]),
                commit('b', &['a']),
                commit('c', &['a']),
                commit('d', &['b', 'c']),
            ],
            Some('d'),
        );
        for edge in &visual.edges {
            let from = visual.commit_by_hash(&edge.from).unwrap();
            assert_eq!(edge.from_row, from.row as i64);
            assert_eq!(edge.from_lane, from.lane as i64);
            if let Some(to) = visual.commit_by_hash(&edge.to) {
                assert_eq!(edge.to_row, to.row as i64);
            }
        }
    }

    #[test]
    fn active_lanes_contain_commit_lane() {
        let visual = layout(
            vec![
                commit('a', &[]),
                commit('b', &['a']),
                commit('c', &['a']),
                commit('d', &['b', 'c']),
            ],
            Some('d'),
        );
        for c in &visual.commits {
            let lanes = visual.active_lanes_at(c.row);
            assert!(lanes.contains(&c.lane), "row {} missing lane {}", c.row, c.lane);
            let mut sorted = lanes.to_vec();
            sorted.sort_unstable();
            assert_eq!(lanes, sorted.as_slice());
        }
    }

    #[test]
    fn branch_lane_spans_intermediate_rows() {
        // d(main tip) - b - a, with c branching off a.
        // Input order: a, b, c, d where d's parent is b.
        // Rows: d=0, c=1, b=2, a=3. c sits on lane 1; the line from c
        // to a passes row 2, so lane 1 must be active there.
        let visual = layout(
            vec![
                commit('a', &[]),
                commit('b', &['a']),
                commit('c', &['a']),
                commit('d', &['b']),
            ],
            Some('d'),
        );
        let c = visual.commit_by_hash(&hash('c')).unwrap();
        let b = visual.commit_by_hash(&hash('b')).unwrap();
        assert_ne!(c.lane, b.lane);
        assert!(visual.active_lanes_at(b.row).contains(&c.lane));
    }

    #[test]
    fn freed_lane_is_reused() {
        // Three tips on b. The newest tip holds lane 0; each other tip
        // forks straight into b's lane, so its own lane frees
        // immediately and the next tip picks it up.
        let visual = layout(
            vec![
                commit('a', &[]),
                commit('b', &['a']),
                commit('c', &['b']),
                commit('d', &['b']),
                commit('e', &['b']),
            ],
            Some('e'),
        );
        // Without reuse this would need three lanes.
        assert_eq!(visual.total_lanes, 2);
        let c = visual.commit_by_hash(&hash('c')).unwrap();
        let d = visual.commit_by_hash(&hash('d')).unwrap();
        assert_eq!(c.lane, 1);
        assert_eq!(d.lane, 1);
    }

    #[test]
    fn lane_zero_is_never_freed() {
        let visual = layout(vec![commit('a', &[]), commit('b', &[])], None);
        // Two parentless roots: the second must not reuse lane 0 even
        // though a's line ends immediately.
        assert_eq!(visual.total_lanes, 2);
    }

    #[test]
    fn branch_tip_flag_from_refs() {
        let date = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
        let a = Commit {
            hash: hash('a'),
            parents: vec![],
            author: Identity::new("a", ""),
            committer: Identity::new("a", ""),
            authored_at: date,
            committed_at: date,
            subject: "a".into(),
            body: String::new(),
        };
        let refs = vec![Ref {
            name: "main".into(),
            full_name: "refs/heads/main".into(),
            commit: hash('a'),
            kind: RefKind::LocalBranch {
                is_head: true,
                is_protected: false,
            },
        }];
        let graph = RepoGraph::build(vec![a], refs, Some(hash('a')), Some("main".into()));
        let visual = compute_layout(&graph, &GraphOptions::default());
        assert!(visual.commits[0].is_branch_tip);
        assert_eq!(visual.commits[0].refs.len(), 1);
        assert!(visual.commits[0].refs[0].is_head);
    }

    #[test]
    fn protection_resolved_against_options() {
        let date = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
        let a = Commit {
            hash: hash('a'),
            parents: vec![],
            author: Identity::new("a", ""),
            committer: Identity::new("a", ""),
            authored_at: date,
            committed_at: date,
            subject: "a".into(),
            body: String::new(),
        };
        // The parsed ref carries no protection flag; the layout options do.
        let refs = vec![Ref {
            name: "release/1.0".into(),
            full_name: "refs/heads/release/1.0".into(),
            commit: hash('a'),
            kind: RefKind::LocalBranch {
                is_head: false,
                is_protected: false,
            },
        }];
        let graph = RepoGraph::build(vec![a], refs, None, None);
        let options = GraphOptions {
            protected_branches: vec!["release/*".into()],
            ..Default::default()
        };
        let visual = compute_layout(&graph, &options);
        assert!(visual.commits[0].refs[0].is_protected);
    }
}
