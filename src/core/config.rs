//! Configuration types for taxprof

use crate::bio::rank::Rank;
use crate::TaxprofError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileConfig {
    /// Input column holding the group ID (header name or 1-based index)
    #[serde(default = "default_group_column")]
    pub group_column: String,
    /// Input column holding the taxon ID (header name or 1-based index)
    #[serde(default = "default_taxon_column")]
    pub taxon_column: String,
    /// Log progress every this many input lines (0 = never)
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Output format: tsv, csv, json or table
    #[serde(default = "default_format")]
    pub format: String,
    /// Ranks whose distinct-group counts appear as report columns
    #[serde(default = "default_ranks")]
    pub ranks: Vec<Rank>,
}

// Default value functions
fn default_group_column() -> String { "group_id".to_string() }
fn default_taxon_column() -> String { "taxon_id".to_string() }
fn default_progress_interval() -> usize { 5000 }
fn default_format() -> String { "tsv".to_string() }
fn default_ranks() -> Vec<Rank> { vec![Rank::Family, Rank::Genus, Rank::Species] }

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            group_column: default_group_column(),
            taxon_column: default_taxon_column(),
            progress_interval: default_progress_interval(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            ranks: default_ranks(),
        }
    }
}

impl Config {
    /// Check values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<(), TaxprofError> {
        if self.profile.group_column.is_empty() || self.profile.taxon_column.is_empty() {
            return Err(TaxprofError::Config("input column names must not be empty".to_string()));
        }
        if self.report.ranks.contains(&Rank::Other) {
            return Err(TaxprofError::Config(
                "report ranks must be major ranks (domain through species)".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, TaxprofError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| TaxprofError::Config(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), TaxprofError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| TaxprofError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
