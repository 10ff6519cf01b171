//! render::svg
//!
//! Standalone SVG documents: one `<path>` per edge, one `<circle>` per
//! commit, stroke and fill colors indexed by lane.

use crate::layout::{edge_path, edge_path_to_svg, VisualGraph};

/// Lane color palette; lanes beyond the palette wrap around.
const LANE_COLORS: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#59a14f", "#e15759", "#b07aa1", "#76b7b2", "#edc948", "#9c755f",
];

/// Commit circle radius in pixels.
const CIRCLE_RADIUS: f64 = 4.0;

/// Edge stroke width in pixels.
const STROKE_WIDTH: f64 = 2.0;

/// Geometry options for SVG output.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Vertical pixels per row
    pub row_height: f64,

    /// Horizontal pixels per lane
    pub lane_width: f64,

    /// Smooth corners with quadratic curves
    pub use_curves: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            row_height: 24.0,
            lane_width: 16.0,
            use_curves: true,
        }
    }
}

/// Render the laid-out graph as a complete SVG document.
pub fn render_svg(visual: &VisualGraph, options: &SvgOptions) -> String {
    let width = (visual.total_lanes.max(1) as f64) * options.lane_width;
    let height = (visual.total_rows as f64) * options.row_height;

    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">\n"
    ));

    // Edges under commits.
    for edge in &visual.edges {
        let points = edge_path(edge);
        let d = edge_path_to_svg(
            &points,
            options.row_height,
            options.lane_width,
            options.use_curves,
        );
        if d.is_empty() {
            continue;
        }
        let color = lane_color(edge.to_lane.max(0) as usize);
        out.push_str(&format!(
            "  <path d=\"{d}\" fill=\"none\" stroke=\"{color}\" \
             stroke-width=\"{STROKE_WIDTH}\"/>\n"
        ));
    }

    for commit in &visual.commits {
        let cx = commit.lane as f64 * options.lane_width + options.lane_width / 2.0;
        let cy = commit.row as f64 * options.row_height + options.row_height / 2.0;
        let color = lane_color(commit.lane);
        let stroke = if commit.is_head {
            " stroke=\"#333333\" stroke-width=\"2\""
        } else {
            ""
        };
        out.push_str(&format!(
            "  <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{CIRCLE_RADIUS}\" \
             fill=\"{color}\"{stroke}><title>{}</title></circle>\n",
            commit.hash
        ));
    }

    out.push_str("</svg>\n");
    out
}

fn lane_color(lane: usize) -> &'static str {
    LANE_COLORS[lane % LANE_COLORS.len()]
}
