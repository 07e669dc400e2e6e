//! Scatter plot of quotient variance against metro population.
//!
//! Reads a report written by the aggregator, keeps the small metros with
//! moderate variance and draws one dot per metro using [`plotters`]'
//! SVG backend. The chart is rendered into memory and returned as markup.

use crate::config::RenderConfig;
use crate::error::Error;
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::Path;

const MARGIN_TOP: u32 = 20;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_BOTTOM: u32 = 30;
const MARGIN_LEFT: u32 = 40;
const DOT_RADIUS: u32 = 3;

/// Padding added on both sides of the data extent so dots stay off the axes.
const DOMAIN_PADDING: f64 = 1.0;

/// The parts of an aggregator report the plot needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScatterInput {
    #[serde(rename = "shareStat", default)]
    pub share_stat: Option<String>,
    #[serde(default)]
    pub metro_level: BTreeMap<String, MetroPoint>,
}

/// Population and variance of one metro, as stored in the report.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MetroPoint {
    #[serde(default)]
    pub population: Option<f64>,
    #[serde(default)]
    pub variance: Option<f64>,
}

/// A metro that made it onto the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub metro: String,
    pub population: f64,
    pub variance: f64,
}

/// Chart size and point filter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterOptions {
    pub width: u32,
    pub height: u32,
    pub max_population: f64,
    pub max_variance: f64,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for ScatterOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            max_population: config.max_population,
            max_variance: config.max_variance,
        }
    }
}

impl ScatterInput {
    /// Label for the y axis, e.g. `empShare quotient variance`.
    pub fn y_label(&self) -> String {
        format!(
            "{} quotient variance",
            self.share_stat.as_deref().unwrap_or("empShare")
        )
    }
}

/// Read an aggregator report from disk.
pub fn load_scatter_input(path: &Path) -> Result<ScatterInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;

    serde_json::from_str(&text).with_context(|| format!("Failed to parse report {}", path.display()))
}

/// Select the metros to plot.
///
/// A metro is kept only if it has a population below `max_population` and
/// a finite variance below `max_variance`.
pub fn scatter_points(input: &ScatterInput, options: &ScatterOptions) -> Vec<ScatterPoint> {
    input
        .metro_level
        .iter()
        .filter_map(|(metro, point)| {
            let population = point.population.filter(|p| p.is_finite())?;
            let variance = point.variance.filter(|v| v.is_finite())?;

            (population < options.max_population && variance < options.max_variance).then(|| {
                ScatterPoint {
                    metro: metro.clone(),
                    population,
                    variance,
                }
            })
        })
        .collect()
}

/// Linear domain covering `values` with [`DOMAIN_PADDING`] on each side.
///
/// Falls back to `0..1` when there are no values.
pub fn padded_domain<I>(values: I) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }

    (min - DOMAIN_PADDING)..(max + DOMAIN_PADDING)
}

/// Render the scatter plot and return the SVG markup.
pub fn render_svg(
    points: &[ScatterPoint],
    y_label: &str,
    options: &ScatterOptions,
) -> Result<String, Error> {
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        draw_scatter(&root, points, y_label)?;
        root.present().map_err(plot_error)?;
    }

    Ok(svg)
}

fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[ScatterPoint],
    y_label: &str,
) -> Result<(), Error> {
    root.fill(&WHITE).map_err(plot_error)?;

    let x_range = padded_domain(points.iter().map(|p| p.population));
    let y_range = padded_domain(points.iter().map(|p| p.variance));

    let mut chart = ChartBuilder::on(root)
        .margin_top(MARGIN_TOP)
        .margin_right(MARGIN_RIGHT)
        .x_label_area_size(MARGIN_BOTTOM)
        .y_label_area_size(MARGIN_LEFT)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("population")
        .y_desc(y_label)
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.population, p.variance), DOT_RADIUS, BLACK.filled())),
        )
        .map_err(plot_error)?;

    Ok(())
}

fn plot_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}
