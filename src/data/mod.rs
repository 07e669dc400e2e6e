//! Input datasets.
//!
//! This module finds the per-metro files for a year and reads the
//! national, population and metro JSON documents.

pub mod files;
pub mod loader;

pub use files::{list_metro_files, metro_code_for, MetroFile};
pub use loader::{
    load_metro, load_national, load_population, national_for_year, parse_share_table,
    population_for_year, read_json,
};
