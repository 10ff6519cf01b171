//! core::commit
//!
//! Commit and ref records.
//!
//! These are the immutable outputs of the parser and the inputs to graph
//! construction. A [`Commit`] keeps its parents in Git's parent order: the
//! first parent is the mainline continuation, later parents are the merged
//! branches.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::types::{CommitHash, Identity};

/// An immutable commit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit hash
    pub hash: CommitHash,

    /// Parent hashes in Git's parent order (empty for a root commit).
    /// The first parent is the branch the commit happened on.
    pub parents: Vec<CommitHash>,

    /// Author identity
    pub author: Identity,

    /// Committer identity
    pub committer: Identity,

    /// When the change was authored (`%aI`)
    pub authored_at: DateTime<FixedOffset>,

    /// When the commit was created (`%cI`)
    pub committed_at: DateTime<FixedOffset>,

    /// First line of the commit message
    pub subject: String,

    /// Remainder of the commit message (may be empty)
    pub body: String,
}

impl Commit {
    /// Whether this commit has two or more parents.
    pub fn is_merge(&self) -> bool {
        self.parents.len() >= 2
    }

    /// The first parent, if any.
    pub fn first_parent(&self) -> Option<&CommitHash> {
        self.parents.first()
    }
}

/// The kind of a ref, with kind-specific flags.
///
/// A remote branch is never HEAD, so only [`RefKind::LocalBranch`] carries
/// the flag; [`Ref::is_head`] resolves it uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefKind {
    /// A branch under `refs/heads/`.
    LocalBranch {
        /// Whether this branch is the current HEAD
        is_head: bool,
        /// Whether a protected-branch pattern matches the short name
        is_protected: bool,
    },

    /// A branch under `refs/remotes/`.
    RemoteBranch {
        /// The remote name (prefix before the first `/` in the short name)
        remote: String,
        /// Whether a protected-branch pattern matches the short name
        is_protected: bool,
    },

    /// A tag under `refs/tags/`.
    Tag {
        /// True for annotated tags; lightweight tags point straight at a commit
        is_annotated: bool,
    },
}

/// A ref: a named pointer at a commit.
///
/// The target commit may be absent from a partially loaded graph; refs are
/// kept regardless so shallow snapshots still show their decorations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    /// Short name (`main`, `origin/main`, `v1.0`)
    pub name: String,

    /// Full name (`refs/heads/main`, ...)
    pub full_name: String,

    /// The commit this ref points at
    pub commit: CommitHash,

    /// Kind and kind-specific flags
    pub kind: RefKind,
}

impl Ref {
    /// Whether this ref is the current HEAD branch.
    pub fn is_head(&self) -> bool {
        matches!(self.kind, RefKind::LocalBranch { is_head: true, .. })
    }

    /// Whether a protected-branch pattern matched this ref.
    ///
    /// Always false for tags; protection applies to branches.
    pub fn is_protected(&self) -> bool {
        match &self.kind {
            RefKind::LocalBranch { is_protected, .. } => *is_protected,
            RefKind::RemoteBranch { is_protected, .. } => *is_protected,
            RefKind::Tag { .. } => false,
        }
    }

    /// Whether this is a local branch.
    pub fn is_local_branch(&self) -> bool {
        matches!(self.kind, RefKind::LocalBranch { .. })
    }

    /// Whether this is a remote-tracking branch.
    pub fn is_remote_branch(&self) -> bool {
        matches!(self.kind, RefKind::RemoteBranch { .. })
    }

    /// Whether this is a tag.
    pub fn is_tag(&self) -> bool {
        matches!(self.kind, RefKind::Tag { .. })
    }
}
