//! render::terminal
//!
//! Terminal rendering of the commit graph.
//!
//! One line per row: lane columns first (commit marker in the commit's
//! lane, pass-through bars in the other active lanes), then the short
//! hash, ref decorations, and the subject.

use crate::core::graph::RepoGraph;
use crate::layout::{VisualCommit, VisualGraph, VisualRef};

/// Commit marker.
const COMMIT_MARK: char = '●';

/// Merge commit marker.
const MERGE_MARK: char = '○';

/// A lane a line passes through on this row.
const PASS_THROUGH: char = '│';

/// Short hash length in decorations.
const SHORT_HASH: usize = 7;

/// Render the graph as terminal text.
///
/// The repository graph supplies commit subjects; the visual graph
/// supplies positions, active lanes, and ref decorations.
pub fn render_ascii(visual: &VisualGraph, graph: &RepoGraph) -> String {
    let mut out = String::new();
    for commit in &visual.commits {
        out.push_str(&render_row(commit, visual, graph));
        out.push('\n');
    }
    out
}

fn render_row(commit: &VisualCommit, visual: &VisualGraph, graph: &RepoGraph) -> String {
    let active = visual.active_lanes_at(commit.row);
    let mut line = String::new();

    for lane in 0..visual.total_lanes {
        let cell = if lane == commit.lane {
            if commit.is_merge {
                MERGE_MARK
            } else {
                COMMIT_MARK
            }
        } else if active.contains(&lane) {
            PASS_THROUGH
        } else {
            ' '
        };
        line.push(cell);
        line.push(' ');
    }

    line.push(' ');
    line.push_str(commit.hash.short(SHORT_HASH));

    let decorations = format_decorations(&commit.refs);
    if !decorations.is_empty() {
        line.push(' ');
        line.push_str(&decorations);
    }

    if let Some(record) = graph.commit(&commit.hash) {
        line.push(' ');
        line.push_str(&record.subject);
    }

    line.trim_end().to_string()
}

/// Format refs as `[main]`, `{origin/main}`, `<v1.0>`; HEAD is starred.
fn format_decorations(refs: &[VisualRef]) -> String {
    refs.iter()
        .map(|r| {
            if r.is_tag {
                format!("<{}>", r.name)
            } else if r.is_remote {
                format!("{{{}}}", r.name)
            } else if r.is_head {
                format!("[*{}]", r.name)
            } else {
                format!("[{}]", r.name)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commit::{Commit, Ref, RefKind};
    use crate::core::config::GraphOptions;
    use crate::core::types::{CommitHash, Identity};
    use crate::layout::compute_layout;
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

    #[test]
    fn linear_history_renders_one_column() {
        let graph = RepoGraph::build(
            vec![commit('a', &[]), commit('b', &['a'])],
            vec![],
            Some(hash('b')),
            None,
        );
        let visual = compute_layout(&graph, &GraphOptions::default());
        let text = render_ascii(&visual, &graph);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('●'));
        assert!(lines[0].contains("bbbbbbb"));
        assert!(lines[0].contains("commit b"));
        assert!(lines[1].contains("commit a"));
    }

    #[test]
    fn merge_commit_gets_hollow_marker() {
        let graph = RepoGraph::build(
            vec![
                commit('a', &[]),
                commit('b', &['a']),
                commit('c', &['a']),
                commit('d', &['b', 'c']),
            ],
            vec![],
            Some(hash('d')),
            None,
        );
        let visual = compute_layout(&graph, &GraphOptions::default());
        let text = render_ascii(&visual, &graph);
        assert!(text.lines().next().unwrap().starts_with('○'));
    }

    #[test]
    fn side_lane_draws_pass_through() {
        // c branches off a; its lane line passes b's row.
        let graph = RepoGraph::build(
            vec![
                commit('a', &[]),
                commit('b', &['a']),
                commit('c', &['a']),
                commit('d', &['b']),
            ],
            vec![],
            Some(hash('d')),
            None,
        );
        let visual = compute_layout(&graph, &GraphOptions::default());
        let text = render_ascii(&visual, &graph);
        let b_line = text
            .lines()
            .find(|l| l.contains("commit b"))
            .unwrap();
        assert!(b_line.contains(PASS_THROUGH));
    }

    #[test]
    fn decorations_for_all_ref_kinds() {
        let refs = vec![
            Ref {
                name: "main".into(),
                full_name: "refs/heads/main".into(),
                commit: hash('a'),
                kind: RefKind::LocalBranch {
                    is_head: true,
                    is_protected: false,
                },
            },
            Ref {
                name: "origin/main".into(),
                full_name: "refs/remotes/origin/main".into(),
                commit: hash('a'),
                kind: RefKind::RemoteBranch {
                    remote: "origin".into(),
                    is_protected: false,
                },
            },
            Ref {
                name: "v1.0".into(),
                full_name: "refs/tags/v1.0".into(),
                commit: hash('a'),
                kind: RefKind::Tag { is_annotated: true },
            },
        ];
        let graph = RepoGraph::build(
            vec![commit('a', &[])],
            refs,
            Some(hash('a')),
            Some("main".into()),
        );
        let visual = compute_layout(&graph, &GraphOptions::default());
        let text = render_ascii(&visual, &graph);
        assert!(text.contains("[*main]"));
        assert!(text.contains("{origin/main}"));
        assert!(text.contains("<v1.0>"));
    }
}
