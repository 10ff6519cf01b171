//! cli::commands
//!
//! Subcommand implementations. Each command is a thin orchestration:
//! open the repository, take a snapshot, lay it out, hand the result to a
//! renderer. No graph logic lives here.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::core::config::GraphOptions;
use crate::git::Git;
use crate::layout::{compute_layout, VisualGraph};
use crate::render::{render_ascii, render_svg, SvgOptions};
use crate::ui::{self, Verbosity};

/// Shared command context from the global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override
    pub cwd: Option<PathBuf>,

    /// Output verbosity
    pub verbosity: Verbosity,
}

impl Context {
    fn repo_path(&self) -> PathBuf {
        self.cwd.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Render the commit graph to the terminal.
pub fn graph(ctx: &Context, options: &GraphOptions, optimize: bool) -> Result<()> {
    let (repo, visual) = load(ctx, options, optimize)?;
    print!("{}", render_ascii(&visual, &repo));
    Ok(())
}

/// Emit the commit graph as an SVG document.
pub fn svg(
    ctx: &Context,
    options: &GraphOptions,
    svg_options: &SvgOptions,
    optimize: bool,
    output: Option<&Path>,
) -> Result<()> {
    let (_, visual) = load(ctx, options, optimize)?;
    let document = render_svg(&visual, svg_options);
    match output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            ui::print(format!("wrote {}", path.display()), ctx.verbosity);
        }
        None => print!("{document}"),
    }
    Ok(())
}

/// Print snapshot statistics, human-readable or JSON.
pub fn stats(ctx: &Context, options: &GraphOptions, json: bool) -> Result<()> {
    let git = Git::open(&ctx.repo_path())?;
    let snapshot = git.snapshot(options)?;
    ui::warn_parse_errors(&snapshot.errors, ctx.verbosity);

    let stats = snapshot.graph.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("commits:         {}", stats.total_commits);
    println!("local branches:  {}", stats.local_branches);
    println!("remote branches: {}", stats.remote_branches);
    println!("tags:            {}", stats.tags);
    println!("merges:          {}", stats.merge_count);
    println!("max parents:     {}", stats.max_parents);
    println!("roots:           {}", stats.root_count);
    if let Some(oldest) = stats.oldest {
        println!("oldest:          {}", oldest.to_rfc3339());
    }
    if let Some(newest) = stats.newest {
        println!("newest:          {}", newest.to_rfc3339());
    }
    Ok(())
}

/// Snapshot and lay out the repository.
fn load(
    ctx: &Context,
    options: &GraphOptions,
    optimize: bool,
) -> Result<(crate::core::graph::RepoGraph, VisualGraph)> {
    let git = Git::open(&ctx.repo_path())?;
    let snapshot = git.snapshot(options)?;
    ui::warn_parse_errors(&snapshot.errors, ctx.verbosity);
    ui::debug(
        format!(
            "{} commits, {} refs loaded",
            snapshot.graph.len(),
            snapshot.graph.refs().len()
        ),
        ctx.verbosity,
    );

    let mut visual = compute_layout(&snapshot.graph, options);
    if optimize {
        let before = visual.count_crossings();
        visual = visual.optimize_lanes();
        ui::debug(
            format!("crossings: {} -> {}", before, visual.count_crossings()),
            ctx.verbosity,
        );
    }
    Ok((snapshot.graph, visual))
}
