//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug output
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::GraphOptions;

/// Tributary - Git commit-graph visualization
#[derive(Parser, Debug)]
#[command(name = "tributary")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if tributary was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Snapshot filters shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Walk all refs instead of just HEAD
    #[arg(long)]
    pub all: bool,

    /// Limit the number of commits loaded
    #[arg(short = 'n', long = "max-commits", value_name = "N")]
    pub max_commits: Option<usize>,

    /// Only commits after this date (passed to git log --since)
    #[arg(long, value_name = "DATE")]
    pub since: Option<String>,

    /// Only commits before this date (passed to git log --until)
    #[arg(long, value_name = "DATE")]
    pub until: Option<String>,

    /// Protected-branch pattern, exact or `*` glob (repeatable)
    #[arg(long = "protected", value_name = "PATTERN")]
    pub protected: Vec<String>,
}

impl FilterArgs {
    /// Build snapshot options from the flags.
    pub fn to_options(&self) -> GraphOptions {
        GraphOptions {
            max_commits: self.max_commits,
            since: self.since.clone(),
            until: self.until.clone(),
            all_refs: self.all,
            protected_branches: self.protected.clone(),
        }
    }
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the commit graph in the terminal
    Graph {
        #[command(flatten)]
        filters: FilterArgs,

        /// Reduce edge crossings before rendering
        #[arg(long)]
        optimize: bool,
    },

    /// Emit the commit graph as an SVG document
    Svg {
        #[command(flatten)]
        filters: FilterArgs,

        /// Vertical pixels per row
        #[arg(long, value_name = "PX", default_value_t = 24.0)]
        row_height: f64,

        /// Horizontal pixels per lane
        #[arg(long, value_name = "PX", default_value_t = 16.0)]
        lane_width: f64,

        /// Straight corners instead of smoothed curves
        #[arg(long)]
        no_curves: bool,

        /// Reduce edge crossings before rendering
        #[arg(long)]
        optimize: bool,

        /// Write to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show snapshot statistics
    Stats {
        #[command(flatten)]
        filters: FilterArgs,

        /// Machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}
