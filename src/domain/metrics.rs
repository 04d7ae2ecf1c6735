//! Output records of the power analyzer and quality validator.

use serde::{Deserialize, Serialize};

/// Power-analysis summary for a treatment/control split.
///
/// `bias` and `coverage` are design assumptions, not estimates: the
/// estimator is taken to be unbiased with nominal 95% interval coverage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticalMetrics {
    pub mse: f64,
    pub variance: f64,
    pub bias: f64,
    pub coverage: f64,
    pub power: f64,
    pub significance_level: f64,
    pub minimum_detectable_effect: f64,
}

/// Composite verdict on a test design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIndicators {
    pub statistical_metrics: StatisticalMetrics,
    /// Pairwise conversion-rate similarity, 0 to 100 (higher is better).
    pub balance_score: f64,
    pub power_adequacy: bool,
    pub sample_size_adequacy: bool,
    pub spend_adequacy: bool,
    pub conversion_volume_adequacy: bool,
    /// 0 to 100.
    pub overall_quality_score: f64,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

impl QualityIndicators {
    /// True when every adequacy check passed.
    #[must_use]
    pub fn all_checks_pass(&self) -> bool {
        self.power_adequacy
            && self.sample_size_adequacy
            && self.spend_adequacy
            && self.conversion_volume_adequacy
    }
}
