//! git
//!
//! Single interface for all Git subprocess invocations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to the `git` binary. All
//! repository reads flow through this interface; no other module spawns
//! processes or looks inside `.git`. The core consumes the captured
//! stdout buffers and never touches the subprocess API.
//!
//! The engine's log format contract requires Git's textual output with an
//! exact `--format` specifier, so this interface shells out to the CLI
//! rather than binding libgit2.
//!
//! # Responsibilities
//!
//! - Repository discovery (`rev-parse --git-dir`)
//! - Capturing log, ref, and HEAD probe output
//! - Snapshot orchestration: capture → parse → build the graph
//!
//! # Invariants
//!
//! - This interface only reads; nothing here mutates the repository
//! - HEAD probe failures mean absence (detached HEAD, empty repo), never
//!   an error

mod executor;

pub use executor::{Git, GitError, Snapshot};
