//! core::traversal
//!
//! BFS queries over the repository graph.
//!
//! All traversals are breadth-first and return results in order of
//! increasing distance from the start. A parent pointer whose target is
//! not among the loaded commits terminates that branch silently, so every
//! query works on partial history loads.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, FixedOffset};

use super::graph::RepoGraph;
use super::types::CommitHash;

impl RepoGraph {
    /// Ancestors of a commit, nearest first.
    ///
    /// The start commit is never included. `max_depth` bounds the walk
    /// (`None` = unbounded); depth 1 is the direct parents.
    pub fn ancestors(&self, hash: &CommitHash, max_depth: Option<usize>) -> Vec<CommitHash> {
        self.walk(hash, max_depth, |g, h| {
            g.commit(h).map(|c| c.parents.as_slice()).unwrap_or(&[])
        })
    }

    /// Descendants of a commit, nearest first.
    ///
    /// Symmetric to [`RepoGraph::ancestors`], walking the child map.
    pub fn descendants(&self, hash: &CommitHash, max_depth: Option<usize>) -> Vec<CommitHash> {
        self.walk(hash, max_depth, |g, h| g.children_of(h))
    }

    /// Whether `candidate` is an ancestor of `target`.
    ///
    /// A commit is not its own ancestor.
    pub fn is_ancestor(&self, candidate: &CommitHash, target: &CommitHash) -> bool {
        if candidate == target {
            return false;
        }
        let mut visited = HashSet::new();
        let mut queue: VecDeque<CommitHash> = self
            .commit(target)
            .map(|c| c.parents.iter().cloned().collect())
            .unwrap_or_default();

        while let Some(current) = queue.pop_front() {
            if current == *candidate {
                return true;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(commit) = self.commit(&current) {
                queue.extend(commit.parents.iter().cloned());
            }
        }
        false
    }

    /// First common ancestor of `a` and `b`, or `None` if the histories
    /// are unrelated.
    ///
    /// Computes the ancestor set of `a` (inclusive), then walks `b`
    /// breadth-first and returns the first commit found in that set. For
    /// linear and simple branching histories this matches Git's
    /// merge-base; for criss-cross merges with several lowest common
    /// ancestors it returns whichever the BFS from `b` reaches first,
    /// which may differ from Git's "best common ancestor".
    pub fn merge_base(&self, a: &CommitHash, b: &CommitHash) -> Option<CommitHash> {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        let mut ancestors_of_a: HashSet<CommitHash> =
            self.ancestors(a, None).into_iter().collect();
        ancestors_of_a.insert(a.clone());

        if ancestors_of_a.contains(b) {
            return Some(b.clone());
        }

        let mut visited = HashSet::new();
        let mut queue: VecDeque<CommitHash> = VecDeque::from([b.clone()]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(commit) = self.commit(&current) {
                for parent in &commit.parents {
                    if ancestors_of_a.contains(parent) {
                        return Some(parent.clone());
                    }
                    queue.push_back(parent.clone());
                }
            }
        }
        None
    }

    /// Commits reachable from `include` but not from `exclude`.
    ///
    /// The equivalent of `git log exclude..include`: `exclude` and its
    /// ancestors form the excluded set, and the walk from `include`
    /// (inclusive) stops descending at excluded commits.
    pub fn commits_between(
        &self,
        include: &CommitHash,
        exclude: &CommitHash,
    ) -> Vec<CommitHash> {
        let mut excluded: HashSet<CommitHash> =
            self.ancestors(exclude, None).into_iter().collect();
        excluded.insert(exclude.clone());

        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        if self.contains(include) {
            queue.push_back(include.clone());
        }

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if excluded.contains(&current) {
                continue;
            }
            result.push(current.clone());
            if let Some(commit) = self.commit(&current) {
                for parent in &commit.parents {
                    if self.contains(parent) {
                        queue.push_back(parent.clone());
                    }
                }
            }
        }
        result
    }

    /// Aggregate statistics over the loaded snapshot.
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            total_commits: self.len(),
            root_count: self.roots().len(),
            ..GraphStats::default()
        };

        for r in self.refs() {
            if r.is_local_branch() {
                stats.local_branches += 1;
            } else if r.is_remote_branch() {
                stats.remote_branches += 1;
            } else {
                stats.tags += 1;
            }
        }

        for hash in self.topological_order() {
            let commit = match self.commit(hash) {
                Some(c) => c,
                None => continue,
            };
            if commit.is_merge() {
                stats.merge_count += 1;
            }
            stats.max_parents = stats.max_parents.max(commit.parents.len());
            let date = commit.committed_at;
            stats.oldest = Some(match stats.oldest {
                Some(d) if d <= date => d,
                _ => date,
            });
            stats.newest = Some(match stats.newest {
                Some(d) if d >= date => d,
                _ => date,
            });
        }

        stats
    }

    /// Depth-bounded BFS from `start` (exclusive) along `neighbors`.
    fn walk<'a, F>(
        &'a self,
        start: &CommitHash,
        max_depth: Option<usize>,
        neighbors: F,
    ) -> Vec<CommitHash>
    where
        F: Fn(&'a RepoGraph, &CommitHash) -> &'a [CommitHash],
    {
        let mut result = Vec::new();
        if !self.contains(start) {
            return result;
        }

        let mut depths: HashMap<CommitHash, usize> = HashMap::new();
        let mut queue: VecDeque<(CommitHash, usize)> = VecDeque::new();
        depths.insert(start.clone(), 0);
        for next in neighbors(self, start) {
            if self.contains(next) && !depths.contains_key(next) {
                depths.insert(next.clone(), 1);
                queue.push_back((next.clone(), 1));
            }
        }

        while let Some((current, depth)) = queue.pop_front() {
            result.push(current.clone());
            if let Some(max) = max_depth {
                if depth >= max {
                    continue;
                }
            }
            for next in neighbors(self, &current) {
                if self.contains(next) && !depths.contains_key(next) {
                    depths.insert(next.clone(), depth + 1);
                    queue.push_back((next.clone(), depth + 1));
                }
            }
        }
        result
    }
}

/// Aggregate snapshot statistics.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct GraphStats {
    /// Number of loaded commits
    pub total_commits: usize,

    /// Local branch refs
    pub local_branches: usize,

    /// Remote-tracking branch refs
    pub remote_branches: usize,

    /// Tag refs
    pub tags: usize,

    /// Commits with two or more parents
    pub merge_count: usize,

    /// Highest parent count on any commit
    pub max_parents: usize,

    /// Earliest commit date in the snapshot
    pub oldest: Option<DateTime<FixedOffset>>,

    /// Latest commit date in the snapshot
    pub newest: Option<DateTime<FixedOffset>>,

    /// Number of root commits
    pub root_count: usize,
}
