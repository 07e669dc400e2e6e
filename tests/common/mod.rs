//! Shared fixtures: a data tree laid out the way the aggregator expects.
//!
//! ```text
//! <root>/national.json
//! <root>/msaPop.json
//! <root>/metroZbp_by_year/<metro>_<year>.json
//! ```

#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const METRO_DIR: &str = "metroZbp_by_year";

pub struct DataTree {
    pub root: TempDir,
}

impl DataTree {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join(METRO_DIR)).unwrap();
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn metro_dir(&self) -> PathBuf {
        self.root.path().join(METRO_DIR)
    }

    pub fn write_national(&self, value: Value) -> &Self {
        write(&self.path().join("national.json"), &value);
        self
    }

    pub fn write_population(&self, value: Value) -> &Self {
        write(&self.path().join("msaPop.json"), &value);
        self
    }

    pub fn write_metro(&self, metro: &str, year: u32, value: Value) -> &Self {
        write(&self.metro_dir().join(format!("{}_{}.json", metro, year)), &value);
        self
    }

    /// The worked example: one sector, one metro, quotient 2.0.
    pub fn example() -> Self {
        let tree = Self::new();
        tree.write_national(json!({
            "2012": {"31": {"empShare": 0.10, "estShare": 0.08}}
        }))
        .write_population(json!({"12345": {"2012": 250000}}))
        .write_metro(
            "12345",
            2012,
            json!({"31": {"empShare": 0.20, "estShare": 0.16}, "totalEmp": 500, "totalEst": 50}),
        );
        tree
    }
}

fn write(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}
