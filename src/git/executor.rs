//! git::executor
//!
//! Git subprocess executor.
//!
//! Runs the `git` binary and captures stdout; the core only ever sees the
//! returned buffers. Stdout is decoded lossily because commit messages
//! may contain arbitrary bytes, and the parser's format contract (NUL
//! field separators) survives lossy decoding.
//!
//! # Error Handling
//!
//! Commands whose failure is meaningful produce [`GitError::CommandFailed`]
//! with captured stderr. The two HEAD probes treat a nonzero exit as
//! absence instead: `symbolic-ref` fails on a detached HEAD and
//! `rev-parse HEAD` fails in an empty repository, and both conditions are
//! ordinary states, not errors.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::core::config::GraphOptions;
use crate::core::graph::RepoGraph;
use crate::parse::log::{parse_log, ParseError, LOG_FORMAT};
use crate::parse::refs::{parse_head, parse_refs};

/// Errors from the Git subprocess boundary.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was probed
        path: PathBuf,
    },

    /// A git command exited nonzero.
    #[error("git {command} failed: {stderr}")]
    CommandFailed {
        /// The subcommand that failed
        command: String,
        /// Captured stderr, trimmed
        stderr: String,
    },

    /// The git binary could not be spawned.
    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),
}

/// A complete repository snapshot: the indexed graph plus any recoverable
/// parse errors encountered while reading the log.
#[derive(Debug)]
pub struct Snapshot {
    /// The indexed repository graph
    pub graph: RepoGraph,

    /// Recoverable log parse errors, for surfacing as warnings
    pub errors: Vec<ParseError>,
}

/// The doorway to the `git` binary.
///
/// All subprocess invocations flow through this struct; no other module
/// spawns processes.
#[derive(Debug, Clone)]
pub struct Git {
    work_dir: PathBuf,
}

impl Git {
    /// Open a repository at `path`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotARepo` if `path` is not inside a Git
    /// repository, or `GitError::Io` if the git binary cannot run.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(path)
            .args(["rev-parse", "--git-dir"])
            .output()?;
        if !output.status.success() {
            return Err(GitError::NotARepo {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            work_dir: path.to_path_buf(),
        })
    }

    /// Take a complete snapshot of the repository.
    ///
    /// Runs the HEAD probes, `for-each-ref`, and `git log`, parses
    /// everything, and builds the graph. Git emits the log newest first;
    /// the graph stores parents before children, so the parsed commits
    /// are reversed before construction.
    pub fn snapshot(&self, options: &GraphOptions) -> Result<Snapshot, GitError> {
        let head = parse_head(
            self.head_branch().as_deref(),
            self.head_commit().as_deref(),
        );

        let patterns = options.protected_patterns();
        let ref_buffer = self.ref_output()?;
        let refs = parse_refs(&ref_buffer, head.head_ref.as_deref(), &patterns);

        // An empty repository has nothing to log, and `git log` would
        // exit nonzero if asked.
        if head.head_commit.is_none() && refs.is_empty() {
            return Ok(Snapshot {
                graph: RepoGraph::build(vec![], refs, None, head.head_ref),
                errors: Vec::new(),
            });
        }

        let log_buffer = self.log_output(options)?;
        let mut parsed = parse_log(&log_buffer);
        parsed.commits.reverse();

        Ok(Snapshot {
            graph: RepoGraph::build(parsed.commits, refs, head.head_commit, head.head_ref),
            errors: parsed.errors,
        })
    }

    /// Raw `git log` output in the parser's format contract.
    pub fn log_output(&self, options: &GraphOptions) -> Result<String, GitError> {
        let args = log_args(options);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run(&args)
    }

    /// Raw `for-each-ref` output for the three rendered namespaces.
    pub fn ref_output(&self) -> Result<String, GitError> {
        self.run(&[
            "for-each-ref",
            "--format=%(objectname) %(refname) %(objecttype)",
            "refs/heads",
            "refs/remotes",
            "refs/tags",
        ])
    }

    /// The current branch short name; `None` when HEAD is detached.
    pub fn head_branch(&self) -> Option<String> {
        self.run_tolerant(&["symbolic-ref", "--short", "-q", "HEAD"])
    }

    /// The current HEAD commit hash; `None` in an empty repository.
    pub fn head_commit(&self) -> Option<String> {
        self.run_tolerant(&["rev-parse", "HEAD"])
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.work_dir)
            .args(args)
            .output()?;
        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.first().copied().unwrap_or_default().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Like [`Git::run`], but a nonzero exit means absence.
    fn run_tolerant(&self, args: &[&str]) -> Option<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.work_dir)
            .args(args)
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Build the `git log` argument list for the given options.
fn log_args(options: &GraphOptions) -> Vec<String> {
    let mut args = vec![
        "log".to_string(),
        "--topo-order".to_string(),
        format!("--format={LOG_FORMAT}"),
    ];
    if options.all_refs {
        args.push("--all".to_string());
    }
    if let Some(n) = options.max_commits {
        args.push("-n".to_string());
        args.push(n.to_string());
    }
    if let Some(since) = &options.since {
        args.push(format!("--since={since}"));
    }
    if let Some(until) = &options.until {
        args.push(format!("--until={until}"));
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_args() {
        let args = log_args(&GraphOptions::default());
        assert_eq!(args[0], "log");
        assert_eq!(args[1], "--topo-order");
        assert!(args[2].starts_with("--format="));
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn all_filters_appear() {
        let options = GraphOptions {
            max_commits: Some(100),
            since: Some("2024-01-01".into()),
            until: Some("2024-06-01".into()),
            all_refs: true,
            protected_branches: vec![],
        };
        let args = log_args(&options);
        assert!(args.contains(&"--all".to_string()));
        assert!(args.contains(&"-n".to_string()));
        assert!(args.contains(&"100".to_string()));
        assert!(args.contains(&"--since=2024-01-01".to_string()));
        assert!(args.contains(&"--until=2024-06-01".to_string()));
    }

    #[test]
    fn open_rejects_missing_path() {
        let missing = std::env::temp_dir().join("tributary-missing-repo-probe");
        assert!(matches!(
            Git::open(&missing),
            Err(GitError::NotARepo { .. })
        ));
    }
}
