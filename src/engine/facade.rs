//! Facade bundling the three algorithms behind one configuration.

use super::{
    BalanceOptimizer, OptimizationRequest, OptimizationResult, PowerAnalyzer, QualityValidator,
};
use crate::config::EngineConfig;
use crate::domain::{
    BudgetConfig, GeographicUnit, QualityIndicators, StatisticalMetrics, TestGroup,
};
use crate::error::Result;

/// One configured instance of all three algorithms.
///
/// Holds no state between calls, so a single engine can serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    config: EngineConfig,
    optimizer: BalanceOptimizer,
    power: PowerAnalyzer,
    validator: QualityValidator,
}

impl MatchingEngine {
    /// Build an engine, validating the configuration first.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            optimizer: BalanceOptimizer::new(config.search.clone()),
            power: PowerAnalyzer::new(&config)?,
            validator: QualityValidator::new(&config),
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn power_analyzer(&self) -> &PowerAnalyzer {
        &self.power
    }

    /// See [`BalanceOptimizer::optimize`].
    pub fn optimize(
        &self,
        units: &[GeographicUnit],
        treatment_fraction: f64,
        objectives: &[String],
    ) -> Result<OptimizationResult> {
        self.optimizer.optimize(units, treatment_fraction, objectives)
    }

    /// See [`BalanceOptimizer::optimize_request`].
    pub fn optimize_request(&self, request: &OptimizationRequest) -> Result<OptimizationResult> {
        self.optimizer.optimize_request(request)
    }

    /// See [`PowerAnalyzer::power`].
    pub fn power(
        &self,
        treatment: &TestGroup,
        control: &TestGroup,
        expected_effect: f64,
    ) -> Result<StatisticalMetrics> {
        self.power.power(treatment, control, expected_effect)
    }

    /// See [`QualityValidator::validate`].
    pub fn validate(
        &self,
        treatment: &TestGroup,
        control: &TestGroup,
        budget: &BudgetConfig,
        metrics: &StatisticalMetrics,
    ) -> Result<QualityIndicators> {
        self.validator.validate(treatment, control, budget, metrics)
    }
}
