//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.metro-quotients.toml` files. Every field has a default, so an empty
//! or partial file is valid.

use crate::analysis::AggregateOptions;
use crate::error::Error;
use crate::models::ShareStat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".metro-quotients.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Locations of the shared datasets.
    #[serde(default)]
    pub data: DataConfig,

    /// Aggregator defaults.
    #[serde(default)]
    pub aggregate: AggregateConfig,

    /// Renderer settings.
    #[serde(default)]
    pub render: RenderConfig,
}

/// Dataset locations, relative to the per-metro input directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// National share table (year -> sector -> shares).
    #[serde(default = "default_national")]
    pub national: PathBuf,

    /// Population table (metro -> year -> population).
    #[serde(default = "default_population")]
    pub population: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            national: default_national(),
            population: default_population(),
        }
    }
}

fn default_national() -> PathBuf {
    PathBuf::from("../national.json")
}

fn default_population() -> PathBuf {
    PathBuf::from("../msaPop.json")
}

/// Aggregator settings that can also be given on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Year to summarize.
    #[serde(default = "default_year")]
    pub year: u32,

    /// Number of variance bins.
    #[serde(default = "default_bins")]
    pub bins: usize,

    /// Share statistic to build quotients from.
    #[serde(default)]
    pub share_stat: ShareStat,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
            bins: default_bins(),
            share_stat: ShareStat::default(),
        }
    }
}

fn default_year() -> u32 {
    2012
}

fn default_bins() -> usize {
    5
}

/// Scatter plot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Aggregator report to plot, relative to the working directory.
    #[serde(default = "default_render_input")]
    pub input: PathBuf,

    /// Metros at or above this population are left off the plot.
    #[serde(default = "default_max_population")]
    pub max_population: f64,

    /// Metros at or above this variance are left off the plot.
    #[serde(default = "default_max_variance")]
    pub max_variance: f64,

    /// Chart width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Chart height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            input: default_render_input(),
            max_population: default_max_population(),
            max_variance: default_max_variance(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_render_input() -> PathBuf {
    PathBuf::from("../output/out.json")
}

fn default_max_population() -> f64 {
    1_000_000.0
}

fn default_max_variance() -> f64 {
    400.0
}

fn default_width() -> u32 {
    960
}

fn default_height() -> u32 {
    500
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) -> Result<(), Error> {
        if let Some(year) = args.year {
            self.aggregate.year = year;
        }
        if let Some(bins) = args.bins {
            self.aggregate.bins = bins;
        }
        if let Some(share_stat) = args.parsed_share_stat()? {
            self.aggregate.share_stat = share_stat;
        }

        Ok(())
    }

    /// Resolve the settings for an aggregation run over `data_dir`.
    ///
    /// Relative dataset paths are taken relative to `data_dir` and resolved
    /// lexically, so they stay valid even if `data_dir` itself is missing.
    pub fn aggregate_options(&self, data_dir: &Path) -> Result<AggregateOptions, Error> {
        if self.aggregate.bins == 0 {
            return Err(Error::InvalidBinCount);
        }

        Ok(AggregateOptions {
            data_dir: data_dir.to_path_buf(),
            year: self.aggregate.year,
            bins: self.aggregate.bins,
            share_stat: self.aggregate.share_stat,
            national_path: lexical_join(data_dir, &self.data.national),
            population_path: lexical_join(data_dir, &self.data.population),
            show_progress: true,
        })
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

/// Join `relative` onto `base`, folding `.` and `..` without touching the
/// file system.
fn lexical_join(base: &Path, relative: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in base.join(relative).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !matches!(out.components().next_back(), Some(Component::RootDir)) {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    fn parse_args(flags: &[&str]) -> Args {
        let argv = std::iter::once("metro-quotients").chain(flags.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.aggregate.year, 2012);
        assert_eq!(config.aggregate.bins, 5);
        assert_eq!(config.aggregate.share_stat, ShareStat::EmpShare);
        assert_eq!(config.data.national, PathBuf::from("../national.json"));
        assert_eq!(config.render.input, PathBuf::from("../output/out.json"));
        assert_eq!(config.render.max_population, 1_000_000.0);
        assert_eq!(config.render.max_variance, 400.0);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[data]
national = "../metroZbp/national.json"

[aggregate]
year = 2013
share_stat = "estShare"

[render]
max_variance = 250.0
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.data.national, PathBuf::from("../metroZbp/national.json"));
        assert_eq!(config.data.population, PathBuf::from("../msaPop.json"));
        assert_eq!(config.aggregate.year, 2013);
        assert_eq!(config.aggregate.bins, 5);
        assert_eq!(config.aggregate.share_stat, ShareStat::EstShare);
        assert_eq!(config.render.max_variance, 250.0);
        assert_eq!(config.render.width, 960);
    }

    #[test]
    fn test_merge_with_args() {
        let mut config: Config = toml::from_str("[aggregate]\nyear = 2010\nbins = 3\n").unwrap();
        let args = parse_args(&["-d", "dir", "-n", "7", "--shareStat", "estShare"]);

        config.merge_with_args(&args).unwrap();
        assert_eq!(config.aggregate.year, 2010);
        assert_eq!(config.aggregate.bins, 7);
        assert_eq!(config.aggregate.share_stat, ShareStat::EstShare);
    }

    #[test]
    fn test_aggregate_options_resolve_paths() {
        let config = Config::default();
        let options = config.aggregate_options(Path::new("data/metroZbp_by_year")).unwrap();

        assert_eq!(options.national_path, PathBuf::from("data/national.json"));
        assert_eq!(options.population_path, PathBuf::from("data/msaPop.json"));
        assert_eq!(options.bins, 5);
    }

    #[test]
    fn test_lexical_join() {
        assert_eq!(
            lexical_join(Path::new("metroZbp_by_year"), Path::new("../national.json")),
            PathBuf::from("national.json")
        );
        assert_eq!(
            lexical_join(Path::new("./a/b"), Path::new("../../../msaPop.json")),
            PathBuf::from("../msaPop.json")
        );
        assert_eq!(
            lexical_join(Path::new("/data/metros"), Path::new("/srv/national.json")),
            PathBuf::from("/srv/national.json")
        );
        assert_eq!(
            lexical_join(Path::new("/"), Path::new("../national.json")),
            PathBuf::from("/national.json")
        );
        assert_eq!(lexical_join(Path::new("dir"), Path::new("..")), PathBuf::from("."));
    }

    #[test]
    fn test_zero_bins_in_config_is_rejected() {
        let config: Config = toml::from_str("[aggregate]\nbins = 0\n").unwrap();
        assert!(matches!(
            config.aggregate_options(Path::new(".")),
            Err(Error::InvalidBinCount)
        ));
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[data]"));
        assert!(toml_str.contains("[aggregate]"));
        assert!(toml_str.contains("[render]"));
        assert!(toml_str.contains("empShare"));

        let reparsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(reparsed.aggregate.year, 2012);
    }
}
