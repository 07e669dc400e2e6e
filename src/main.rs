//! metro-quotients - sector share quotient aggregator
//!
//! Reads the `<metroCode>_<year>.json` files of one year, divides every
//! sector share by the national share, summarizes the quotients per metro,
//! bins metros by quotient variance and prints the report as JSON.
//!
//! Exit codes:
//!   0 - Success, or usage printed because no arguments were given
//!   1 - Invalid arguments, year missing from the national data,
//!       unreadable input directory or data file

use anyhow::{Context, Result};
use clap::CommandFactory;
use metro_quotients::analysis;
use metro_quotients::cli::Args;
use metro_quotients::config::{Config, DEFAULT_CONFIG_FILE};
use metro_quotients::report;
use metro_quotients::Error;
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // No arguments at all: print usage and exit cleanly
    if std::env::args_os().len() <= 1 {
        Args::command().print_help()?;
        return Ok(());
    }

    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args)?;

    info!("metro-quotients v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_aggregate(&args).await {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .metro-quotients.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr; stdout is reserved for the report.
fn init_logging(args: &Args) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Run the aggregation and return the report as JSON.
async fn run_aggregate(args: &Args) -> Result<String> {
    let mut config = load_config(args)?;
    config.merge_with_args(args)?;

    let data_dir = args.data_dir.as_deref().ok_or(Error::MissingDataDir)?;
    let mut options = config.aggregate_options(data_dir)?;
    options.show_progress = !args.quiet;

    info!(
        "Summarizing {} for {} into {} bins",
        options.share_stat, options.year, options.bins
    );

    let report = analysis::run(&options).await?;
    report::generate_json_report(&report)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
