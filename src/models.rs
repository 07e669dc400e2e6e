//! Data models for the quotient aggregator.
//!
//! This module contains the core data structures shared by the aggregator
//! and the renderer: sector shares, per-metro summaries and the report
//! document printed by the aggregator.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Aggregate fields carried by metro tables that are not sectors.
pub const AGGREGATE_FIELDS: [&str; 2] = ["totalEmp", "totalEst"];

/// Returns true if `code` names an aggregate field rather than a sector.
pub fn is_aggregate_field(code: &str) -> bool {
    AGGREGATE_FIELDS.contains(&code)
}

/// Which share attribute the quotients are computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShareStat {
    /// Share of total employment.
    #[default]
    #[serde(rename = "empShare")]
    EmpShare,
    /// Share of total establishments.
    #[serde(rename = "estShare")]
    EstShare,
}

impl ShareStat {
    /// Returns the attribute name as it appears in the data files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareStat::EmpShare => "empShare",
            ShareStat::EstShare => "estShare",
        }
    }
}

impl fmt::Display for ShareStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareStat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empShare" => Ok(ShareStat::EmpShare),
            "estShare" => Ok(ShareStat::EstShare),
            other => Err(Error::UnsupportedShareStat(other.to_string())),
        }
    }
}

/// Employment and establishment shares of one sector in one geography.
///
/// Either share may be missing from the source data; a missing share
/// reads as NaN so that any quotient built from it is dropped later.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorShare {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emp_share: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub est_share: Option<f64>,
}

impl SectorShare {
    /// Creates a share entry with both attributes present.
    pub fn new(emp_share: f64, est_share: f64) -> Self {
        Self {
            emp_share: Some(emp_share),
            est_share: Some(est_share),
        }
    }

    /// Reads a sector entry from raw JSON.
    ///
    /// Returns `None` if the value is not an object. Non-numeric
    /// attributes are treated as missing.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            emp_share: obj.get("empShare").and_then(Value::as_f64),
            est_share: obj.get("estShare").and_then(Value::as_f64),
        })
    }

    /// Returns the selected share, or NaN if it is missing.
    pub fn get(&self, stat: ShareStat) -> f64 {
        let value = match stat {
            ShareStat::EmpShare => self.emp_share,
            ShareStat::EstShare => self.est_share,
        };
        value.unwrap_or(f64::NAN)
    }
}

/// Sector code (NAICS) to share entry, for one geography and year.
pub type ShareTable = BTreeMap<String, SectorShare>;

/// Metro code to population, for one year.
pub type PopulationIndex = BTreeMap<String, u64>;

/// Summary statistics of a single metro's quotients.
///
/// Non-finite statistics serialize as `null`; a missing population is
/// left out of the document entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetroSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    pub max: f64,
    pub mean: f64,
    pub variance: f64,
}

/// Summary statistics of the national shares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NationSummary {
    pub max: f64,
    pub mean: f64,
    /// Serialized under the historical `variace` key so existing
    /// consumers of the report keep working.
    #[serde(rename = "variace")]
    pub variance: f64,
}

/// The complete document printed by the aggregator.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    /// Year the data was selected for.
    pub year: u32,
    /// Share attribute the quotients were computed from.
    #[serde(rename = "shareStat")]
    pub share_stat: ShareStat,
    /// Statistics of the national shares themselves.
    pub nation: NationSummary,
    /// Per-metro quotient statistics, keyed by metro code.
    pub metro_level: BTreeMap<String, MetroSummary>,
    /// Metro codes grouped into variance quantile bins, lowest first.
    #[serde(rename = "varianceBins")]
    pub variance_bins: Vec<Vec<String>>,
}

impl AggregateReport {
    /// Number of metros that ended up in a bin.
    pub fn binned_count(&self) -> usize {
        self.variance_bins.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_share_stat_from_str() {
        assert_eq!("empShare".parse::<ShareStat>().unwrap(), ShareStat::EmpShare);
        assert_eq!("estShare".parse::<ShareStat>().unwrap(), ShareStat::EstShare);
        assert!(matches!(
            "payroll".parse::<ShareStat>(),
            Err(Error::UnsupportedShareStat(ref s)) if s == "payroll"
        ));
        // Names are case sensitive, as in the data files.
        assert!("EmpShare".parse::<ShareStat>().is_err());
    }

    #[test]
    fn test_share_stat_serializes_as_attribute_name() {
        assert_eq!(serde_json::to_string(&ShareStat::EstShare).unwrap(), "\"estShare\"");
        assert_eq!(ShareStat::EmpShare.to_string(), "empShare");
    }

    #[test]
    fn test_sector_share_from_json() {
        let share = SectorShare::from_json(&json!({"empShare": 0.2, "estShare": 0.16})).unwrap();
        assert_eq!(share.get(ShareStat::EmpShare), 0.2);
        assert_eq!(share.get(ShareStat::EstShare), 0.16);

        let partial = SectorShare::from_json(&json!({"empShare": "n/a"})).unwrap();
        assert!(partial.get(ShareStat::EmpShare).is_nan());
        assert!(partial.get(ShareStat::EstShare).is_nan());

        assert!(SectorShare::from_json(&json!(500)).is_none());
    }

    #[test]
    fn test_aggregate_fields() {
        assert!(is_aggregate_field("totalEmp"));
        assert!(is_aggregate_field("totalEst"));
        assert!(!is_aggregate_field("31"));
    }

    #[test]
    fn test_report_serialization_shape() {
        let mut metro_level = BTreeMap::new();
        metro_level.insert(
            "12345".to_string(),
            MetroSummary {
                population: None,
                max: 2.0,
                mean: 2.0,
                variance: f64::NAN,
            },
        );

        let report = AggregateReport {
            year: 2012,
            share_stat: ShareStat::EmpShare,
            nation: NationSummary {
                max: 0.1,
                mean: 0.1,
                variance: 0.0,
            },
            metro_level,
            variance_bins: vec![vec!["12345".to_string()], vec![]],
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["year"], json!(2012));
        assert_eq!(value["shareStat"], json!("empShare"));
        assert_eq!(value["nation"]["variace"], json!(0.0));
        assert!(value["nation"].get("variance").is_none());
        assert!(value["metro_level"]["12345"].get("population").is_none());
        assert_eq!(value["metro_level"]["12345"]["variance"], Value::Null);
        assert_eq!(value["varianceBins"], json!([["12345"], []]));
        assert_eq!(report.binned_count(), 1);
    }
}
