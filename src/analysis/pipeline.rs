//! The aggregation pipeline.
//!
//! load national -> load population -> list metro files -> summarize each
//! metro -> bin by variance -> report. Every step except the loading is a
//! pure function over the data model.

use super::binning::bin_by_variance;
use super::quotient::{compute_quotients, national_summary};
use crate::data::{self, MetroFile};
use crate::error::Error;
use crate::models::{AggregateReport, PopulationIndex, ShareStat, ShareTable};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything a single aggregation run needs to know.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Directory holding the `<metroCode>_<year>.json` files.
    pub data_dir: PathBuf,
    /// Year to select.
    pub year: u32,
    /// Number of variance bins.
    pub bins: usize,
    /// Share attribute to build quotients from.
    pub share_stat: ShareStat,
    /// Path to `national.json`.
    pub national_path: PathBuf,
    /// Path to `msaPop.json`.
    pub population_path: PathBuf,
    /// Whether to draw a progress bar on stderr.
    pub show_progress: bool,
}

/// One metro's sector table, in input order.
#[derive(Debug, Clone)]
pub struct MetroInput {
    pub metro: String,
    pub table: ShareTable,
}

/// Build the report from already loaded data.
pub fn aggregate(
    year: u32,
    share_stat: ShareStat,
    bins: usize,
    national: &ShareTable,
    population: &PopulationIndex,
    metros: &[MetroInput],
) -> Result<AggregateReport, Error> {
    if bins == 0 {
        return Err(Error::InvalidBinCount);
    }

    let mut metro_level = BTreeMap::new();
    let mut variances = Vec::with_capacity(metros.len());
    let mut unmatched = 0usize;

    for input in metros {
        let quotients = compute_quotients(&input.metro, &input.table, national, share_stat);
        unmatched += quotients.unmatched.len();

        let summary = quotients.summarize(population.get(&input.metro).copied());
        variances.push((input.metro.clone(), summary.variance));
        metro_level.insert(input.metro.clone(), summary);
    }

    if unmatched > 0 {
        info!("Skipped {} sector entries with no national counterpart", unmatched);
    }

    let variance_bins = bin_by_variance(&variances, bins)?;

    Ok(AggregateReport {
        year,
        share_stat,
        nation: national_summary(national, share_stat),
        metro_level,
        variance_bins,
    })
}

/// Run the full pipeline against the files named in `options`.
pub async fn run(options: &AggregateOptions) -> Result<AggregateReport> {
    let national = data::load_national(&options.national_path, options.year)?;
    info!(
        "Loaded {} national sectors for {}",
        national.len(),
        options.year
    );

    let population = data::load_population(&options.population_path, options.year)?;
    debug!("Population known for {} metros", population.len());

    let files = data::list_metro_files(&options.data_dir, options.year).await?;
    info!(
        "Found {} metro files for {} in {}",
        files.len(),
        options.year,
        options.data_dir.display()
    );

    let metros = read_metros(&files, options.show_progress)?;

    let report = aggregate(
        options.year,
        options.share_stat,
        options.bins,
        &national,
        &population,
        &metros,
    )?;

    info!(
        "Binned {} of {} metros into {} bins",
        report.binned_count(),
        report.metro_level.len(),
        options.bins
    );

    Ok(report)
}

/// Read every metro file in order, drawing a progress bar if asked to.
fn read_metros(files: &[MetroFile], show_progress: bool) -> Result<Vec<MetroInput>> {
    let pb = if show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut metros = Vec::with_capacity(files.len());

    for file in files {
        pb.set_message(file.metro.clone());
        let table = data::load_metro(&file.path)?;
        metros.push(MetroInput {
            metro: file.metro.clone(),
            table,
        });
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(metros)
}
