//! render
//!
//! Renderers over a laid-out graph.
//!
//! Both renderers are deterministic string builders: they read the visual
//! graph (and the repository graph for commit metadata), hold no state,
//! and perform no I/O.
//!
//! - [`terminal`] - Unicode lane art for terminal output
//! - [`svg`] - Standalone SVG documents

pub mod svg;
pub mod terminal;

pub use svg::{render_svg, SvgOptions};
pub use terminal::render_ascii;
