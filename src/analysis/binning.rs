//! Quantile binning of metros by quotient variance.
//!
//! Cut points are computed once from every finite variance of the run.
//! Each metro then lands in the first bin whose cut point its variance
//! does not exceed, or in the last bin if it exceeds them all.

use super::stats::{quantile_sorted, sorted_finite};
use crate::error::Error;
use tracing::debug;

/// Compute the `bins - 1` cut points at fractions `i / bins`.
///
/// Returns an empty list when there are no finite variances to cut.
pub fn cut_points(variances: &[f64], bins: usize) -> Result<Vec<f64>, Error> {
    if bins == 0 {
        return Err(Error::InvalidBinCount);
    }

    let sorted = sorted_finite(variances.iter().copied());

    let cuts = (1..bins)
        .filter_map(|i| quantile_sorted(&sorted, i as f64 / bins as f64))
        .collect();

    Ok(cuts)
}

/// Index of the bin `variance` falls into, given the cut points.
pub fn bin_index(variance: f64, cuts: &[f64]) -> usize {
    cuts.iter()
        .position(|cut| variance <= *cut)
        .unwrap_or(cuts.len())
}

/// Partition metros into `bins` ordered groups by variance.
///
/// `metros` is visited in order, so each bin lists its members in input
/// order. Metros with a non-finite variance are left out. The result
/// always holds exactly `bins` lists, some possibly empty.
pub fn bin_by_variance(metros: &[(String, f64)], bins: usize) -> Result<Vec<Vec<String>>, Error> {
    let variances: Vec<f64> = metros.iter().map(|(_, variance)| *variance).collect();
    let cuts = cut_points(&variances, bins)?;
    debug!("Variance cut points: {:?}", cuts);

    let mut grouped: Vec<Vec<String>> = vec![Vec::new(); bins];

    for (metro, variance) in metros {
        if !variance.is_finite() {
            debug!("Metro {} has no finite variance, not binned", metro);
            continue;
        }

        let index = bin_index(*variance, &cuts).min(bins - 1);
        grouped[index].push(metro.clone());
    }

    Ok(grouped)
}
