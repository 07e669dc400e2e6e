//! quotient-scatter - plot quotient variance against metro population
//!
//! Reads the report written by `metro-quotients` (`../output/out.json`
//! unless the `[render]` table of `.metro-quotients.toml` says otherwise)
//! and prints an SVG scatter plot to stdout. Takes no arguments; set
//! `RUST_LOG` to change the log level.

use anyhow::Result;
use metro_quotients::config::Config;
use metro_quotients::report::{load_scatter_input, render_svg, scatter_points, ScatterOptions};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to set tracing subscriber");
    }
}

fn run() -> Result<()> {
    let config = Config::load_default()?.unwrap_or_default();
    let options = ScatterOptions::from(&config.render);

    let input = load_scatter_input(&config.render.input)?;
    let points = scatter_points(&input, &options);

    info!(
        "Plotting {} of {} metros from {}",
        points.len(),
        input.metro_level.len(),
        config.render.input.display()
    );
    if points.is_empty() {
        warn!(
            "No metro has population < {} and variance < {}",
            options.max_population, options.max_variance
        );
    }

    let svg = render_svg(&points, &input.y_label(), &options)?;
    println!("{}", svg);

    Ok(())
}
