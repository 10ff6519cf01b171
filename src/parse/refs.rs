//! parse::refs
//!
//! Parsing of `for-each-ref` output and the two HEAD probes.
//!
//! # Format Contract
//!
//! One ref per line: `<hash> <full-refname> <object-type>`, whitespace
//! separated, as produced by
//! `git for-each-ref --format='%(objectname) %(refname) %(objecttype)'`.
//!
//! Lines that do not parse, refs outside the three known namespaces, and
//! symbolic remote HEADs (`refs/remotes/*/HEAD`) are silently dropped.
//! This input is machine-generated, and the failure mode is absence.

use crate::core::commit::{Ref, RefKind};
use crate::core::config::ProtectedPatterns;
use crate::core::types::CommitHash;

/// Result of the two HEAD probes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Head {
    /// Current branch short name; `None` when HEAD is detached
    pub head_ref: Option<String>,

    /// Current HEAD commit; `None` for an empty repository
    pub head_commit: Option<CommitHash>,
}

/// Parse the outputs of `symbolic-ref --short HEAD` and `rev-parse HEAD`.
///
/// Both are optional: an empty or absent `symbolic-ref` output means a
/// detached HEAD, an invalid or absent `rev-parse` output means an empty
/// repository.
///
/// # Example
///
/// ```
/// use tributary::parse::refs::parse_head;
///
/// let head = parse_head(Some("main\n"), Some(&"a".repeat(40)));
/// assert_eq!(head.head_ref.as_deref(), Some("main"));
/// assert!(head.head_commit.is_some());
///
/// let detached = parse_head(Some(""), Some(&"a".repeat(40)));
/// assert_eq!(detached.head_ref, None);
/// ```
pub fn parse_head(symbolic_ref: Option<&str>, rev_parse: Option<&str>) -> Head {
    let head_ref = symbolic_ref
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);
    let head_commit = rev_parse
        .map(str::trim)
        .and_then(|s| CommitHash::new(s).ok());
    Head {
        head_ref,
        head_commit,
    }
}

/// Parse a `for-each-ref` buffer into refs.
///
/// `head_branch` marks the matching local branch as HEAD; `protected`
/// resolves the per-branch protection flag.
pub fn parse_refs(
    buffer: &str,
    head_branch: Option<&str>,
    protected: &ProtectedPatterns,
) -> Vec<Ref> {
    buffer
        .lines()
        .filter_map(|line| parse_ref_line(line, head_branch, protected))
        .collect()
}

fn parse_ref_line(
    line: &str,
    head_branch: Option<&str>,
    protected: &ProtectedPatterns,
) -> Option<Ref> {
    let mut parts = line.split_ascii_whitespace();
    let commit = CommitHash::new(parts.next()?).ok()?;
    let full_name = parts.next()?;
    let object_type = parts.next()?;

    if let Some(name) = full_name.strip_prefix("refs/heads/") {
        return Some(Ref {
            name: name.to_string(),
            full_name: full_name.to_string(),
            commit,
            kind: RefKind::LocalBranch {
                is_head: head_branch == Some(name),
                is_protected: protected.matches(name),
            },
        });
    }

    if let Some(name) = full_name.strip_prefix("refs/remotes/") {
        // Git's symbolic remote HEAD is not a branch.
        if name.ends_with("/HEAD") {
            return None;
        }
        let remote = name.split('/').next().unwrap_or(name).to_string();
        return Some(Ref {
            name: name.to_string(),
            full_name: full_name.to_string(),
            commit,
            kind: RefKind::RemoteBranch {
                remote,
                is_protected: protected.matches(name),
            },
        });
    }

    if let Some(name) = full_name.strip_prefix("refs/tags/") {
        return Some(Ref {
            name: name.to_string(),
            full_name: full_name.to_string(),
            commit,
            kind: RefKind::Tag {
                is_annotated: object_type == "tag",
            },
        });
    }

    // Anything else (stash, notes, custom namespaces) is not rendered.
    None
}
