//! cli
//!
//! Command-line interface layer: parses arguments and delegates to the
//! command implementations.

pub mod args;
pub mod commands;

use anyhow::Result;

use crate::render::SvgOptions;
use crate::ui::Verbosity;

pub use args::{Cli, Command, FilterArgs};

/// Parse arguments and run the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let ctx = commands::Context {
        cwd: cli.cwd.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    match cli.command {
        Command::Graph { filters, optimize } => {
            commands::graph(&ctx, &filters.to_options(), optimize)
        }
        Command::Svg {
            filters,
            row_height,
            lane_width,
            no_curves,
            optimize,
            output,
        } => {
            let svg_options = SvgOptions {
                row_height,
                lane_width,
                use_curves: !no_curves,
            };
            commands::svg(
                &ctx,
                &filters.to_options(),
                &svg_options,
                optimize,
                output.as_deref(),
            )
        }
        Command::Stats { filters, json } => {
            commands::stats(&ctx, &filters.to_options(), json)
        }
    }
}
