//! core::graph
//!
//! Indexed repository graph.
//!
//! # Architecture
//!
//! The repository graph is a DAG where:
//! - Nodes are commits, keyed by hash
//! - Edges point from child to parent (stored as parent lists on commits)
//! - The child map is the derived inverse, in commit-encounter order
//!
//! # Invariants
//!
//! - Every child listed in `children[p]` has `p` among its parents
//! - Both the short and full name of every ref resolve in `commits_by_ref`
//! - Roots have no parents, or only parents outside the loaded commit set
//! - Construction cannot fail; refs and parent pointers may target commits
//!   that are not loaded (partial history), and every consumer tolerates
//!   that

use std::collections::HashMap;

use super::commit::{Commit, Ref};
use super::types::CommitHash;

/// The canonical indexed snapshot of a repository.
///
/// Built once from parsed commits and refs; immutable thereafter.
///
/// # Example
///
/// ```
/// use tributary::core::graph::RepoGraph;
///
/// let graph = RepoGraph::build(vec![], vec![], None, None);
/// assert!(graph.is_empty());
/// assert!(graph.head().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RepoGraph {
    commits: HashMap<CommitHash, Commit>,
    refs: Vec<Ref>,
    head: Option<CommitHash>,
    head_ref: Option<String>,
    children: HashMap<CommitHash, Vec<CommitHash>>,
    commits_by_ref: HashMap<String, CommitHash>,
    refs_by_commit: HashMap<CommitHash, Vec<Ref>>,
    roots: Vec<CommitHash>,
    topological_order: Vec<CommitHash>,
}

impl RepoGraph {
    /// Build a graph from parsed commits and refs.
    ///
    /// `commits` must be topologically ordered with parents before
    /// children (oldest first); the order is stored as given and the
    /// layout consumes it reversed. `head` is the current HEAD commit if
    /// any, `head_ref` the current branch short name (absent when
    /// detached or the repository is empty).
    ///
    /// Construction cannot fail. Refs whose target is not among the
    /// loaded commits are kept, and parent pointers may dangle.
    pub fn build(
        commits: Vec<Commit>,
        refs: Vec<Ref>,
        head: Option<CommitHash>,
        head_ref: Option<String>,
    ) -> Self {
        let mut graph = Self {
            head,
            head_ref,
            ..Self::default()
        };

        // Pass 1: index commits, carry the input sequence as topo order.
        graph.topological_order = commits.iter().map(|c| c.hash.clone()).collect();
        for commit in commits {
            graph.commits.insert(commit.hash.clone(), commit);
        }

        // Pass 2: invert the parent relation in encounter order.
        for hash in &graph.topological_order {
            let commit = &graph.commits[hash];
            for parent in &commit.parents {
                graph
                    .children
                    .entry(parent.clone())
                    .or_default()
                    .push(hash.clone());
            }
        }

        // Pass 3: roots are parentless commits, or commits whose parents
        // all fall outside the loaded set.
        for hash in &graph.topological_order {
            let commit = &graph.commits[hash];
            let orphaned = commit.parents.is_empty()
                || commit.parents.iter().all(|p| !graph.commits.contains_key(p));
            if orphaned {
                graph.roots.push(hash.clone());
            }
        }

        // Pass 4: ref indices. Both names resolve; targets may be absent.
        for r in &refs {
            graph
                .commits_by_ref
                .insert(r.name.clone(), r.commit.clone());
            graph
                .commits_by_ref
                .insert(r.full_name.clone(), r.commit.clone());
            graph
                .refs_by_commit
                .entry(r.commit.clone())
                .or_default()
                .push(r.clone());
        }
        graph.refs = refs;

        graph
    }

    /// Look up a commit by hash.
    pub fn commit(&self, hash: &CommitHash) -> Option<&Commit> {
        self.commits.get(hash)
    }

    /// Whether a commit is in the loaded set.
    pub fn contains(&self, hash: &CommitHash) -> bool {
        self.commits.contains_key(hash)
    }

    /// Number of loaded commits.
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Whether the graph has no commits.
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Children of a commit, in encounter order.
    pub fn children_of(&self, hash: &CommitHash) -> &[CommitHash] {
        self.children.get(hash).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All refs, in parse order.
    pub fn refs(&self) -> &[Ref] {
        &self.refs
    }

    /// Refs pointing at a commit.
    pub fn refs_at(&self, hash: &CommitHash) -> &[Ref] {
        self.refs_by_commit
            .get(hash)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve a ref by short or full name.
    pub fn resolve_ref(&self, name: &str) -> Option<&CommitHash> {
        self.commits_by_ref.get(name)
    }

    /// The current HEAD commit, if the repository is non-empty.
    pub fn head(&self) -> Option<&CommitHash> {
        self.head.as_ref()
    }

    /// The current branch short name; absent when HEAD is detached.
    pub fn head_ref(&self) -> Option<&str> {
        self.head_ref.as_deref()
    }

    /// Root commits: parentless, or with all parents unloaded.
    pub fn roots(&self) -> &[CommitHash] {
        &self.roots
    }

    /// The stored topological order (parents before children).
    pub fn topological_order(&self) -> &[CommitHash] {
        &self.topological_order
    }
}
