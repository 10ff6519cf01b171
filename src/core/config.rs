//! core::config
//!
//! Snapshot options and protected-branch matching.
//!
//! # Options
//!
//! [`GraphOptions`] controls what the executor asks Git for (commit cap,
//! date window, all refs) and which branches the layout marks protected.
//! The date filters are handed to `git log` verbatim; the core itself does
//! no date filtering.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Options for taking a repository snapshot.
///
/// # Example
///
/// ```
/// use tributary::core::config::GraphOptions;
///
/// let options = GraphOptions {
///     max_commits: Some(500),
///     protected_branches: vec!["main".into(), "release/*".into()],
///     ..Default::default()
/// };
/// assert!(!options.all_refs);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GraphOptions {
    /// Cap on the number of commits requested from `git log` (`-n`)
    pub max_commits: Option<usize>,

    /// ISO date passed to `git log --since`
    pub since: Option<String>,

    /// ISO date passed to `git log --until`
    pub until: Option<String>,

    /// Walk all refs (`--all`) instead of just HEAD
    pub all_refs: bool,

    /// Protected-branch patterns: exact names or `*` globs
    pub protected_branches: Vec<String>,
}

impl GraphOptions {
    /// Compile the protected-branch patterns into a matcher.
    pub fn protected_patterns(&self) -> ProtectedPatterns {
        ProtectedPatterns::compile(&self.protected_branches)
    }
}

/// Compiled protected-branch patterns.
///
/// Each pattern is an exact string or a glob where `*` matches any run of
/// characters: regex metacharacters other than `*` are escaped, `*`
/// becomes `.*`, and the whole pattern is anchored. A branch is protected
/// if any pattern matches its short name.
///
/// # Example
///
/// ```
/// use tributary::core::config::ProtectedPatterns;
///
/// let patterns = ProtectedPatterns::compile(&["main".into(), "release/*".into()]);
/// assert!(patterns.matches("main"));
/// assert!(patterns.matches("release/1.0"));
/// assert!(!patterns.matches("feature/x"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProtectedPatterns {
    regexes: Vec<Regex>,
}

impl ProtectedPatterns {
    /// Compile a pattern list. Patterns that fail to compile are ignored.
    pub fn compile(patterns: &[String]) -> Self {
        let regexes = patterns
            .iter()
            .filter_map(|pattern| Regex::new(&glob_to_regex(pattern)).ok())
            .collect();
        Self { regexes }
    }

    /// Whether any pattern matches the given short branch name.
    pub fn matches(&self, name: &str) -> bool {
        self.regexes.iter().any(|re| re.is_match(name))
    }

    /// Whether no patterns were configured.
    pub fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }
}

/// Translate a `*`-glob into an anchored regex source string.
fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 2);
    out.push('^');
    for c in pattern.chars() {
        match c {
            '*' => out.push_str(".*"),
            // Escape everything regex-significant except '*'
            '.' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('$');
    out
}
