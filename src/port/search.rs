//! Assignment search port.
//!
//! The balance optimizer only needs "find a treatment set of exactly
//! `n_treatment` units with a low balance score". This trait is that
//! contract, so the random-restart heuristic can be swapped for simulated
//! annealing or an exact MIP backend without touching callers.

use serde::{Deserialize, Serialize};

use crate::engine::FeatureMatrix;
use crate::error::Result;

/// A search strategy over treatment/control assignments.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - The returned assignment must mark exactly `n_treatment` units
/// - `n_treatment` is already validated to lie in `1..matrix.len()`
pub trait AssignmentSearch: Send + Sync {
    /// Strategy name for logging/config.
    fn name(&self) -> &'static str;

    /// Search for a low-scoring assignment of `n_treatment` treatment units.
    fn search(&self, matrix: &FeatureMatrix, n_treatment: usize) -> Result<SearchOutcome>;
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A candidate scored below the balance tolerance.
    ToleranceReached,
    /// The iteration budget ran out first.
    IterationCap,
}

/// Best assignment found by a search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// `assignment[i]` is true when unit `i` is in treatment.
    pub assignment: Vec<bool>,
    /// Balance score of `assignment`.
    pub score: f64,
    /// Candidates evaluated.
    pub iterations: usize,
    pub stop_reason: StopReason,
}

impl SearchOutcome {
    /// Check if the search stopped because the tolerance was reached.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::ToleranceReached
    }
}
