//! JSON readers for the national, population and per-metro datasets.
//!
//! Each reader is split into a thin file wrapper and a parser over an
//! already decoded `serde_json::Value`, so the parsing rules can be
//! tested without touching the file system.

use crate::error::Error;
use crate::models::{is_aggregate_field, PopulationIndex, SectorShare, ShareTable};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Read and decode a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the national share table for `year` from `national.json`.
pub fn load_national(path: &Path, year: u32) -> Result<ShareTable> {
    let root = read_json(path)?;
    Ok(national_for_year(&root, year)?)
}

/// Load the metro -> population index for `year` from `msaPop.json`.
pub fn load_population(path: &Path, year: u32) -> Result<PopulationIndex> {
    let root = read_json(path)?;
    Ok(population_for_year(&root, year))
}

/// Load one metro's sector table.
pub fn load_metro(path: &Path) -> Result<ShareTable> {
    let root = read_json(path)?;
    let source = path.display().to_string();
    Ok(parse_share_table(&root, &source))
}

/// Select the share table for `year` out of the national dataset.
pub fn national_for_year(root: &Value, year: u32) -> Result<ShareTable, Error> {
    let table = root
        .get(year.to_string())
        .filter(|v| v.is_object())
        .ok_or(Error::YearNotFound(year))?;

    Ok(parse_share_table(table, "national data"))
}

/// Project the population dataset onto `year`.
///
/// Metros without a usable figure for the year are simply absent.
pub fn population_for_year(root: &Value, year: u32) -> PopulationIndex {
    let key = year.to_string();
    let Some(metros) = root.as_object() else {
        warn!("Population data is not an object; no populations available");
        return PopulationIndex::new();
    };

    metros
        .iter()
        .filter_map(|(metro, by_year)| {
            let population = by_year.get(&key).and_then(population_value)?;
            Some((metro.clone(), population))
        })
        .collect()
}

/// Interpret a population figure, accepting integral floats.
fn population_value(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }

    value
        .as_f64()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u64)
}

/// Read a sector -> share table, skipping aggregate fields.
///
/// Entries that are not objects are logged and dropped. `source` names
/// the table in log messages.
pub fn parse_share_table(value: &Value, source: &str) -> ShareTable {
    let mut table = ShareTable::new();

    let Some(entries) = value.as_object() else {
        warn!("{}: expected an object of sector shares", source);
        return table;
    };

    for (code, entry) in entries {
        if is_aggregate_field(code) {
            continue;
        }

        match SectorShare::from_json(entry) {
            Some(share) => {
                table.insert(code.clone(), share);
            }
            None => warn!("{}: malformed entry for sector {}", source, code),
        }
    }

    debug!("{}: {} sectors", source, table.len());
    table
}
