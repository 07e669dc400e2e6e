//! Share quotients and per-metro summaries.
//!
//! A quotient divides a metro's share of a sector by the nation's share of
//! the same sector. Values above 1 mean the sector is more concentrated in
//! the metro than in the country as a whole.

use super::stats::Summary;
use crate::models::{is_aggregate_field, MetroSummary, NationSummary, ShareStat, ShareTable};
use std::collections::BTreeMap;
use tracing::warn;

/// Quotients computed for a single metro.
#[derive(Debug, Clone, Default)]
pub struct MetroQuotients {
    /// Sector code to quotient. May hold non-finite values.
    pub quotients: BTreeMap<String, f64>,
    /// Sector codes present in the metro but missing nationally.
    pub unmatched: Vec<String>,
}

impl MetroQuotients {
    /// Summarizes the finite quotients and attaches the population.
    pub fn summarize(&self, population: Option<u64>) -> MetroSummary {
        let summary = Summary::of(self.quotients.values().copied());

        MetroSummary {
            population,
            max: summary.max,
            mean: summary.mean,
            variance: summary.variance,
        }
    }
}

/// Compute the quotient of every sector in `metro_table` against `national`.
///
/// Sectors unknown to the national table are logged and skipped; they
/// never abort the run.
pub fn compute_quotients(
    metro: &str,
    metro_table: &ShareTable,
    national: &ShareTable,
    stat: ShareStat,
) -> MetroQuotients {
    let mut result = MetroQuotients::default();

    for (naics, metro_share) in metro_table {
        if is_aggregate_field(naics) {
            continue;
        }

        let Some(national_share) = national.get(naics) else {
            warn!("In metro {}: unrecognized NAICS code {}", metro, naics);
            result.unmatched.push(naics.clone());
            continue;
        };

        let quotient = metro_share.get(stat) / national_share.get(stat);
        result.quotients.insert(naics.clone(), quotient);
    }

    result
}

/// Compute the quotients of a metro and summarize them in one step.
pub fn summarize_metro(
    metro: &str,
    metro_table: &ShareTable,
    national: &ShareTable,
    stat: ShareStat,
    population: Option<u64>,
) -> MetroSummary {
    compute_quotients(metro, metro_table, national, stat).summarize(population)
}

/// Summary statistics of the national shares for `stat`.
pub fn national_summary(national: &ShareTable, stat: ShareStat) -> NationSummary {
    let summary = Summary::of(national.values().map(|share| share.get(stat)));

    NationSummary {
        max: summary.max,
        mean: summary.mean,
        variance: summary.variance,
    }
}
