//! Command-line interface argument parsing.
//!
//! This module handles the aggregator's CLI arguments using clap,
//! including validation. Defaults for year, bin count and share
//! statistic live in the configuration so a config file can change them.

use crate::error::Error;
use crate::models::ShareStat;
use clap::Parser;
use std::path::PathBuf;

/// metro-quotients - sector share quotient statistics for U.S. metros
///
/// Computes, for every metro file of a year, the quotient of each sector's
/// metro share over its national share, summarizes those quotients and
/// groups metros into quantile bins by quotient variance. The report is
/// printed to stdout as JSON.
///
/// Examples:
///   metro-quotients -d data/metroZbp_by_year
///   metro-quotients -d data/metroZbp_by_year -y 2013 -n 10 --shareStat estShare
///   metro-quotients --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory of per-metro files named `<metroCode>_<year>.json` (required)
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Year to summarize [default: 2012]
    #[arg(short, long, value_name = "YEAR")]
    pub year: Option<u32>,

    /// Number of bins to group metros into by share variance [default: 5]
    #[arg(short = 'n', long = "bins", value_name = "COUNT")]
    pub bins: Option<usize>,

    /// Share statistic: "empShare" or "estShare" [default: empShare]
    #[arg(long = "shareStat", alias = "share-stat", value_name = "STAT")]
    pub share_stat: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .metro-quotients.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "METRO_QUOTIENTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .metro-quotients.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The `--shareStat` value, if one was given.
    pub fn parsed_share_stat(&self) -> Result<Option<ShareStat>, Error> {
        self.share_stat.as_deref().map(str::parse::<ShareStat>).transpose()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.data_dir.is_none() {
            return Err(Error::MissingDataDir.to_string());
        }

        self.parsed_share_stat().map_err(|e| e.to_string())?;

        if self.bins == Some(0) {
            return Err(Error::InvalidBinCount.to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::WARN
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
