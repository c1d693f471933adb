//! Analysis policy configuration
//!
//! The thresholds and caps below are behavioral constants of the analyzer.
//! They can be overridden from a TOML, YAML or JSON document, but the
//! defaults are what every report uses unless told otherwise.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum share of parseable values for a column to count as numeric (inclusive)
pub const NUMERIC_THRESHOLD: f64 = 0.5;

/// Maximum number of categories kept in a bar chart
pub const MAX_BAR_CATEGORIES: usize = 20;

/// Lower bound for histogram bin count
pub const MIN_HISTOGRAM_BINS: usize = 5;

/// Upper bound for histogram bin count
pub const MAX_HISTOGRAM_BINS: usize = 20;

/// Number of numeric columns pre-selected when more are available
pub const DEFAULT_SELECTION_LIMIT: usize = 10;

/// Name of the derived X group total
pub const X_TOTAL: &str = "X_TOTAL";

/// Name of the derived Y group total
pub const Y_TOTAL: &str = "Y_TOTAL";

/// Analyzer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub numeric_threshold: f64,
    pub max_bar_categories: usize,
    pub min_histogram_bins: usize,
    pub max_histogram_bins: usize,
    pub default_selection_limit: usize,
    /// Case-insensitive name prefix of X group columns
    pub x_prefix: String,
    /// Case-insensitive name prefix of Y group columns
    pub y_prefix: String,
    pub x_total_name: String,
    pub y_total_name: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            numeric_threshold: NUMERIC_THRESHOLD,
            max_bar_categories: MAX_BAR_CATEGORIES,
            min_histogram_bins: MIN_HISTOGRAM_BINS,
            max_histogram_bins: MAX_HISTOGRAM_BINS,
            default_selection_limit: DEFAULT_SELECTION_LIMIT,
            x_prefix: "x".to_string(),
            y_prefix: "y".to_string(),
            x_total_name: X_TOTAL.to_string(),
            y_total_name: Y_TOTAL.to_string(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: AnalyzerConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: AnalyzerConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: AnalyzerConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, choosing the format by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Self::from_toml_str(&source),
            "yaml" | "yml" => Self::from_yaml_str(&source),
            "json" => Self::from_json_str(&source),
            other => Err(Error::Config(format!(
                "unrecognized configuration file extension '{}'",
                other
            ))),
        }
    }

    /// Check that every setting is usable
    pub fn validate(&self) -> Result<()> {
        if !(self.numeric_threshold > 0.0 && self.numeric_threshold <= 1.0) {
            return Err(Error::Config(format!(
                "numeric_threshold must be in (0, 1], got {}",
                self.numeric_threshold
            )));
        }
        if self.max_bar_categories == 0 {
            return Err(Error::Config("max_bar_categories must be positive".into()));
        }
        if self.min_histogram_bins == 0 || self.min_histogram_bins > self.max_histogram_bins {
            return Err(Error::Config(format!(
                "histogram bin bounds must satisfy 0 < min <= max, got {}..{}",
                self.min_histogram_bins, self.max_histogram_bins
            )));
        }
        if self.x_prefix.trim().is_empty() || self.y_prefix.trim().is_empty() {
            return Err(Error::Config("group prefixes must not be empty".into()));
        }
        if self.x_total_name == self.y_total_name {
            return Err(Error::Config("total column names must differ".into()));
        }
        Ok(())
    }
}
