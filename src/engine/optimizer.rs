//! Balance optimizer: splits a catalog into treatment and control.
//!
//! The optimizer validates the request, builds the [`FeatureMatrix`], hands
//! it to an [`AssignmentSearch`] backend, and turns the winning assignment
//! back into unit ids plus per-metric balance percentages.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::search::RandomRestartSearch;
use super::FeatureMatrix;
use crate::config::SearchConfig;
use crate::domain::error::DomainError;
use crate::domain::{GeographicUnit, GroupType, TestGroup, UnitId};
use crate::error::{Error, Result};
use crate::port::{AssignmentSearch, StopReason};

/// Input of an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub available_units: Vec<GeographicUnit>,
    /// Metric names the caller cares about. Advisory: the search weights
    /// all seven metrics equally.
    #[serde(default)]
    pub objectives: Vec<String>,
    /// Opaque caller constraints, carried but not used by the search.
    #[serde(default)]
    pub constraints: BTreeMap<String, serde_json::Value>,
    #[serde(default = "default_treatment_percentage")]
    pub treatment_percentage: f64,
}

fn default_treatment_percentage() -> f64 {
    0.5
}

impl OptimizationRequest {
    #[must_use]
    pub fn new(available_units: Vec<GeographicUnit>, treatment_percentage: f64) -> Self {
        Self {
            available_units,
            objectives: Vec::new(),
            constraints: BTreeMap::new(),
            treatment_percentage,
        }
    }

    #[must_use]
    pub fn with_objectives<I, T>(mut self, objectives: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.objectives = objectives.into_iter().map(Into::into).collect();
        self
    }
}

/// Output of an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub treatment_units: Vec<UnitId>,
    pub control_units: Vec<UnitId>,
    /// Percentage difference of treatment vs control mean per metric.
    pub balance_metrics: BTreeMap<String, f64>,
    /// Best balance score found (lower is better).
    pub optimization_score: f64,
    pub iterations: usize,
    /// True only when the score dropped below the balance tolerance.
    pub convergence_achieved: bool,
    pub stop_reason: StopReason,
}

impl OptimizationResult {
    /// Build the treatment and control groups for this partition.
    ///
    /// `units` must contain every id of the partition (usually the catalog
    /// that was optimized). Allocation percentages are shares of units.
    pub fn form_groups(&self, units: &[GeographicUnit]) -> Result<(TestGroup, TestGroup)> {
        let by_id: HashMap<&UnitId, &GeographicUnit> =
            units.iter().map(|unit| (&unit.id, unit)).collect();
        let total = (self.treatment_units.len() + self.control_units.len()) as f64;

        let collect = |ids: &[UnitId]| -> Result<Vec<GeographicUnit>> {
            ids.iter()
                .map(|id| {
                    by_id
                        .get(id)
                        .map(|unit| (*unit).clone())
                        .ok_or_else(|| Error::from(DomainError::UnknownUnitId { id: id.clone() }))
                })
                .collect()
        };

        let treatment = TestGroup::from_units(
            GroupType::Treatment,
            collect(&self.treatment_units)?,
            self.treatment_units.len() as f64 / total * 100.0,
        )?;
        let control = TestGroup::from_units(
            GroupType::Control,
            collect(&self.control_units)?,
            self.control_units.len() as f64 / total * 100.0,
        )?;
        Ok((treatment, control))
    }
}

/// Number of treatment units for a catalog of `n` units.
///
/// Rounds `n * treatment_fraction` to the nearest integer and requires both
/// sides to end up non-empty. Ties round up: 10 units at 0.25 treat 3.
pub fn treatment_size(n: usize, treatment_fraction: f64) -> Result<usize> {
    if n == 0 {
        return Err(Error::invalid("catalog is empty"));
    }
    if !(treatment_fraction > 0.0 && treatment_fraction < 1.0) {
        return Err(Error::invalid(format!(
            "treatment_percentage must be in (0, 1), got {treatment_fraction}"
        )));
    }
    let n_treatment = (n as f64 * treatment_fraction).round() as usize;
    if n_treatment == 0 || n_treatment >= n {
        return Err(Error::invalid(format!(
            "treatment_percentage {treatment_fraction} of {n} units leaves an empty group"
        )));
    }
    Ok(n_treatment)
}

/// Splits catalogs into balanced treatment/control partitions.
#[derive(Debug, Clone)]
pub struct BalanceOptimizer<S = RandomRestartSearch> {
    search: S,
}

impl BalanceOptimizer<RandomRestartSearch> {
    /// Optimizer backed by the random-restart search.
    #[must_use]
    pub const fn new(config: SearchConfig) -> Self {
        Self {
            search: RandomRestartSearch::new(config),
        }
    }
}

impl<S: AssignmentSearch> BalanceOptimizer<S> {
    /// Optimizer backed by a custom search strategy.
    pub const fn with_search(search: S) -> Self {
        Self { search }
    }

    /// Get the search backend.
    pub const fn search(&self) -> &S {
        &self.search
    }

    /// Run an [`OptimizationRequest`].
    pub fn optimize_request(&self, request: &OptimizationRequest) -> Result<OptimizationResult> {
        self.optimize(
            &request.available_units,
            request.treatment_percentage,
            &request.objectives,
        )
    }

    /// Partition `units` so that `round(n * treatment_fraction)` of them are
    /// treated and the two sides are as balanced as the search can find.
    pub fn optimize(
        &self,
        units: &[GeographicUnit],
        treatment_fraction: f64,
        objectives: &[String],
    ) -> Result<OptimizationResult> {
        let n_treatment = treatment_size(units.len(), treatment_fraction)?;
        validate_catalog(units)?;

        if !objectives.is_empty() {
            debug!(?objectives, "objectives are advisory; balancing all metrics");
        }

        let matrix = FeatureMatrix::from_units(units);
        let outcome = self.search.search(&matrix, n_treatment)?;

        let balance_metrics = matrix
            .balance_metrics(&outcome.assignment)
            .ok_or_else(|| Error::invalid("search returned a partition with an empty side"))?;

        let mut treatment_units = Vec::with_capacity(n_treatment);
        let mut control_units = Vec::with_capacity(units.len() - n_treatment);
        for (unit, &treated) in units.iter().zip(&outcome.assignment) {
            if treated {
                treatment_units.push(unit.id.clone());
            } else {
                control_units.push(unit.id.clone());
            }
        }

        if !outcome.converged() {
            warn!(
                iterations = outcome.iterations,
                best_score = outcome.score,
                "Balance tolerance not reached; returning best partition found"
            );
        }

        Ok(OptimizationResult {
            treatment_units,
            control_units,
            balance_metrics,
            optimization_score: outcome.score,
            iterations: outcome.iterations,
            convergence_achieved: outcome.converged(),
            stop_reason: outcome.stop_reason,
        })
    }
}

fn validate_catalog(units: &[GeographicUnit]) -> Result<()> {
    let mut seen = HashSet::with_capacity(units.len());
    for unit in units {
        unit.validate()?;
        if !seen.insert(&unit.id) {
            return Err(DomainError::DuplicateUnitId {
                id: unit.id.clone(),
            }
            .into());
        }
    }
    Ok(())
}
