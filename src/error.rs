//! Domain errors.
//!
//! Every variant here is fatal for the run that raised it. I/O and parse
//! failures at file boundaries are reported through `anyhow` context
//! instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an aggregation or rendering run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing required -d flag (path to the per-metro data directory)")]
    MissingDataDir,

    #[error("The only supported --shareStat values are \"empShare\" and \"estShare\" (got \"{0}\")")]
    UnsupportedShareStat(String),

    #[error("Year {0} is not in the data.")]
    YearNotFound(u32),

    #[error("Could not get the list of files in {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bin count must be at least 1")]
    InvalidBinCount,

    #[error("Failed to render chart: {0}")]
    Plot(String),
}
