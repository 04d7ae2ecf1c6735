//! Test budget configuration.

use serde::{Deserialize, Serialize};

/// How budget is split across treatment units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMethod {
    #[default]
    Equal,
    PopulationWeighted,
}

/// Budget attached to a lift test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub total_budget: f64,
    pub daily_budget: f64,
    pub duration_days: u32,
    /// Minimum combined historical spend for the test to be measurable.
    #[serde(default = "default_min_spend_threshold")]
    pub min_spend_threshold: f64,
    #[serde(default)]
    pub allocation_method: AllocationMethod,
}

fn default_min_spend_threshold() -> f64 {
    1000.0
}

impl BudgetConfig {
    /// Create a budget with the default spend threshold and equal allocation.
    #[must_use]
    pub fn new(total_budget: f64, daily_budget: f64, duration_days: u32) -> Self {
        Self {
            total_budget,
            daily_budget,
            duration_days,
            min_spend_threshold: default_min_spend_threshold(),
            allocation_method: AllocationMethod::default(),
        }
    }

    /// Override the minimum spend threshold.
    #[must_use]
    pub fn with_min_spend_threshold(mut self, threshold: f64) -> Self {
        self.min_spend_threshold = threshold;
        self
    }

    /// Spend implied by running the daily budget for the whole test.
    #[must_use]
    pub fn planned_spend(&self) -> f64 {
        self.daily_budget * f64::from(self.duration_days)
    }
}
