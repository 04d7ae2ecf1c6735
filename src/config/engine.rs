//! Tunable constants of the matching engine.

use serde::Deserialize;

use crate::error::ConfigError;

/// Engine-wide statistical settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Two-sided significance level (alpha).
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
    /// Minimum acceptable power; also the target power for the MDE.
    #[serde(default = "default_min_power")]
    pub min_power: f64,
    /// Reject groups whose `total_population` disagrees with their members.
    #[serde(default)]
    pub strict_group_totals: bool,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub quality: QualityThresholds,
}

fn default_significance_level() -> f64 {
    0.05
}

fn default_min_power() -> f64 {
    0.8
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            significance_level: default_significance_level(),
            min_power: default_min_power(),
            strict_group_totals: false,
            search: SearchConfig::default(),
            quality: QualityThresholds::default(),
        }
    }
}

/// Settings for the randomized balance search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchConfig {
    /// Upper bound on candidate assignments drawn per run.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Balance score below which the search stops early.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: f64,
    /// Fixed RNG seed; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

const fn default_max_iterations() -> usize {
    10_000
}

fn default_balance_tolerance() -> f64 {
    0.01
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            balance_tolerance: default_balance_tolerance(),
            seed: None,
        }
    }
}

/// Fixed thresholds used by the quality validator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QualityThresholds {
    /// Minimum combined population of both groups.
    #[serde(default = "default_min_population")]
    pub min_population: u64,
    /// Minimum combined historical conversions of both groups.
    #[serde(default = "default_min_conversions")]
    pub min_conversions: u64,
    /// Overall scores below this get a redesign recommendation.
    #[serde(default = "default_redesign_below")]
    pub redesign_below: f64,
    /// Overall scores below this (and at or above `redesign_below`) get an
    /// "acceptable but improvable" note.
    #[serde(default = "default_acceptable_below")]
    pub acceptable_below: f64,
    /// Pairwise balance comparisons above this count are logged as slow.
    #[serde(default = "default_pairwise_warn_pairs")]
    pub pairwise_warn_pairs: usize,
}

const fn default_min_population() -> u64 {
    10_000
}

const fn default_min_conversions() -> u64 {
    100
}

fn default_redesign_below() -> f64 {
    60.0
}

fn default_acceptable_below() -> f64 {
    80.0
}

const fn default_pairwise_warn_pairs() -> usize {
    250_000
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_population: default_min_population(),
            min_conversions: default_min_conversions(),
            redesign_below: default_redesign_below(),
            acceptable_below: default_acceptable_below(),
            pairwise_warn_pairs: default_pairwise_warn_pairs(),
        }
    }
}

impl EngineConfig {
    /// Check that every setting is within its meaningful range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "significance_level",
                reason: "must be between 0 and 1 (exclusive)".to_string(),
            });
        }
        if !(self.min_power > 0.0 && self.min_power < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "min_power",
                reason: "must be between 0 and 1 (exclusive)".to_string(),
            });
        }
        if self.search.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_iterations",
                reason: "must be greater than 0".to_string(),
            });
        }
        if !(self.search.balance_tolerance >= 0.0 && self.search.balance_tolerance.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "balance_tolerance",
                reason: "must be a finite number >= 0".to_string(),
            });
        }
        let quality = &self.quality;
        if !(0.0..=100.0).contains(&quality.redesign_below)
            || !(0.0..=100.0).contains(&quality.acceptable_below)
        {
            return Err(ConfigError::InvalidValue {
                field: "score_bands",
                reason: "bands must lie within 0..=100".to_string(),
            });
        }
        if quality.redesign_below > quality.acceptable_below {
            return Err(ConfigError::InvalidValue {
                field: "score_bands",
                reason: "redesign_below must be <= acceptable_below".to_string(),
            });
        }
        Ok(())
    }
}
