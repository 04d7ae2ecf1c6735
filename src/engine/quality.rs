//! Quality validation: five adequacy checks folded into one score.
//!
//! Each check contributes a quality factor on a 0-100 scale. Failed binary
//! checks still earn partial credit so that a near-miss on one check does
//! not zero out an otherwise sound design.

use tracing::{debug, warn};

use crate::config::{EngineConfig, QualityThresholds};
use crate::domain::{
    BudgetConfig, GeographicUnit, QualityIndicators, StatisticalMetrics, TestGroup,
};
use crate::error::{Error, Result};

/// Factor earned when the combined population is below the minimum.
const SAMPLE_SIZE_SHORTFALL_CREDIT: f64 = 50.0;
/// Factor earned when combined historical spend is below the budget threshold.
const SPEND_SHORTFALL_CREDIT: f64 = 30.0;
/// Factor earned when combined conversions are below the minimum.
const CONVERSION_SHORTFALL_CREDIT: f64 = 20.0;
/// Floor for the rate-similarity denominator so two zero rates compare equal.
const RATE_FLOOR: f64 = 0.001;

/// Scores a formed test design.
#[derive(Debug, Clone)]
pub struct QualityValidator {
    min_power: f64,
    strict_group_totals: bool,
    thresholds: QualityThresholds,
}

impl QualityValidator {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            min_power: config.min_power,
            strict_group_totals: config.strict_group_totals,
            thresholds: config.quality.clone(),
        }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Evaluate the design and produce its quality verdict.
    ///
    /// Pure: identical inputs always yield identical indicators.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if either group has no units, and a
    /// `PopulationMismatch` under `strict_group_totals` when a group's total
    /// disagrees with its members.
    pub fn validate(
        &self,
        treatment: &TestGroup,
        control: &TestGroup,
        budget: &BudgetConfig,
        metrics: &StatisticalMetrics,
    ) -> Result<QualityIndicators> {
        for group in [treatment, control] {
            if group.is_empty() {
                return Err(Error::insufficient(format!(
                    "{} group has no units",
                    group.group_type
                )));
            }
            if self.strict_group_totals {
                group.verify_totals()?;
            }
        }

        let mut recommendations = Vec::new();
        let mut warnings = Vec::new();

        let power_adequacy = metrics.power >= self.min_power;
        if !power_adequacy {
            warnings.push(format!(
                "Statistical power ({:.2}) below minimum threshold ({})",
                metrics.power, self.min_power
            ));
            recommendations.push("Consider increasing sample size or test duration".to_string());
        }

        let total_population = treatment
            .total_population
            .saturating_add(control.total_population);
        let sample_size_adequacy = total_population >= self.thresholds.min_population;
        if !sample_size_adequacy {
            warnings.push(format!(
                "Total population ({}) below recommended minimum ({})",
                group_thousands(total_population),
                group_thousands(self.thresholds.min_population)
            ));
            recommendations
                .push("Include more geographic units or choose larger markets".to_string());
        }

        let total_spend = treatment.historical_spend() + control.historical_spend();
        let spend_adequacy = total_spend >= budget.min_spend_threshold;
        if !spend_adequacy {
            warnings.push("Historical spend too low for reliable measurement".to_string());
            recommendations.push("Increase budget or choose higher-spend markets".to_string());
        }

        let total_conversions = treatment
            .historical_conversions()
            .saturating_add(control.historical_conversions());
        let conversion_volume_adequacy = total_conversions >= self.thresholds.min_conversions;
        if !conversion_volume_adequacy {
            warnings.push(format!(
                "Conversion volume ({total_conversions}) too low for reliable measurement"
            ));
            recommendations
                .push("Extend test duration or include higher-converting markets".to_string());
        }

        let balance_score = self.balance_score(&treatment.units, &control.units);

        let factors = [
            metrics.power * 100.0,
            credit(sample_size_adequacy, SAMPLE_SIZE_SHORTFALL_CREDIT),
            credit(spend_adequacy, SPEND_SHORTFALL_CREDIT),
            credit(conversion_volume_adequacy, CONVERSION_SHORTFALL_CREDIT),
            balance_score,
        ];
        let overall_quality_score = factors.iter().sum::<f64>() / factors.len() as f64;

        if overall_quality_score < self.thresholds.redesign_below {
            recommendations.push(
                "Test quality is below recommended threshold - consider redesigning".to_string(),
            );
        } else if overall_quality_score < self.thresholds.acceptable_below {
            recommendations.push("Test quality is acceptable but could be improved".to_string());
        }

        debug!(
            overall_quality_score,
            balance_score,
            warnings = warnings.len(),
            "Quality validation complete"
        );

        Ok(QualityIndicators {
            statistical_metrics: *metrics,
            balance_score,
            power_adequacy,
            sample_size_adequacy,
            spend_adequacy,
            conversion_volume_adequacy,
            overall_quality_score,
            recommendations,
            warnings,
        })
    }

    /// Mean pairwise conversion-rate similarity over every (treatment,
    /// control) pair, scaled to 0-100.
    ///
    /// Similarity of a pair is `1 - min(|r_t - r_c| / max(r_t, r_c, 0.001), 1)`.
    /// This is O(n_t * n_c); fine for tens of units, slow for catalogs of
    /// thousands. Returns 0 when either side is empty.
    #[must_use]
    pub fn balance_score(&self, treatment: &[GeographicUnit], control: &[GeographicUnit]) -> f64 {
        let pairs = treatment.len() * control.len();
        if pairs == 0 {
            return 0.0;
        }
        if self.exceeds_pairwise_limit(pairs) {
            warn!(
                pairs,
                limit = self.thresholds.pairwise_warn_pairs,
                "Pairwise balance score over a large catalog"
            );
        }

        let total: f64 = treatment
            .iter()
            .flat_map(|t| control.iter().map(move |c| rate_similarity(t, c)))
            .sum();
        total / pairs as f64 * 100.0
    }

    fn exceeds_pairwise_limit(&self, pairs: usize) -> bool {
        pairs > self.thresholds.pairwise_warn_pairs
    }
}

fn rate_similarity(a: &GeographicUnit, b: &GeographicUnit) -> f64 {
    let denominator = a.conversion_rate.max(b.conversion_rate).max(RATE_FLOOR);
    let distance = (a.conversion_rate - b.conversion_rate).abs() / denominator;
    1.0 - distance.min(1.0)
}

fn credit(adequate: bool, shortfall_credit: f64) -> f64 {
    if adequate {
        100.0
    } else {
        shortfall_credit
    }
}

/// Format with comma thousands separators, e.g. `12,500`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
