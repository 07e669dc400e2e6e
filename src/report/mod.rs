//! Report output.
//!
//! `json` prints the aggregator's report document; `scatter` turns a
//! saved report into an SVG scatter plot.

pub mod json;
pub mod scatter;

pub use json::generate_json_report;
pub use scatter::{
    load_scatter_input, render_svg, scatter_points, ScatterInput, ScatterOptions, ScatterPoint,
};
