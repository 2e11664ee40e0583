// Configuration for evaluations and reference tables
//
// Loaded from an optional hypotest.toml; every field has a default so an
// empty file is a valid configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Defaults applied when the caller does not choose explicitly
///
/// # Example
/// ```
/// use hypotest::config::DashboardConfig;
///
/// let config = DashboardConfig::default();
/// assert_eq!(config.significance_level, 0.05); // 95% confidence
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// α used when a command does not pass `--alpha`
    ///
    /// - 0.05 (default): 5% Type I error rate
    /// - 0.01: stricter, fewer false positives and lower power
    /// - 0.10: looser, more false positives and higher power
    pub significance_level: f64,

    /// Decimal places in text output
    pub decimals: usize,

    /// Rows of the critical value reference table
    pub alpha_grid: Vec<f64>,

    /// Degrees of freedom shown as t columns in the reference table
    pub reference_dfs: Vec<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            decimals: 4,
            alpha_grid: vec![0.10, 0.05, 0.025, 0.01, 0.005],
            reference_dfs: vec![30, 60],
        }
    }
}

impl DashboardConfig {
    /// α = 1%
    pub fn conservative() -> Self {
        Self {
            significance_level: 0.01,
            ..Self::default()
        }
    }

    /// α = 10%
    pub fn exploratory() -> Self {
        Self {
            significance_level: 0.10,
            ..Self::default()
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            ));
        }

        if self.decimals > 12 {
            return Err(format!("decimals must be <= 12, got {}", self.decimals));
        }

        if let Some(alpha) = self
            .alpha_grid
            .iter()
            .find(|a| !(**a > 0.0 && **a < 1.0))
        {
            return Err(format!("alpha_grid entries must be in (0, 1), got {alpha}"));
        }

        if self.reference_dfs.contains(&0) {
            return Err("reference_dfs entries must be >= 1, got 0".to_string());
        }

        Ok(())
    }
}
