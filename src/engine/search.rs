//! Random-restart balance search.
//!
//! Despite the "integer optimization" framing this is a heuristic: it draws
//! uniformly random treatment sets of the requested size and keeps the best
//! one. There is no optimality guarantee; the iteration cap bounds the
//! worst-case latency.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use tracing::debug;

use super::FeatureMatrix;
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::port::{AssignmentSearch, SearchOutcome, StopReason};

/// Multi-start random sampling over fixed-size treatment sets.
#[derive(Debug, Clone, Default)]
pub struct RandomRestartSearch {
    config: SearchConfig,
}

impl RandomRestartSearch {
    /// Create a new search with the given configuration.
    #[must_use]
    pub const fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl AssignmentSearch for RandomRestartSearch {
    fn name(&self) -> &'static str {
        "random_restart"
    }

    fn search(&self, matrix: &FeatureMatrix, n_treatment: usize) -> Result<SearchOutcome> {
        let n = matrix.len();
        if n_treatment == 0 || n_treatment >= n {
            return Err(Error::invalid(format!(
                "treatment size {n_treatment} leaves an empty group among {n} units"
            )));
        }

        let mut rng = self.rng();
        let mut candidate = vec![false; n];
        let mut best: Option<(Vec<bool>, f64)> = None;
        let mut iterations = 0;
        let mut stop_reason = StopReason::IterationCap;

        for _ in 0..self.config.max_iterations {
            iterations += 1;

            candidate.fill(false);
            for idx in index::sample(&mut rng, n, n_treatment) {
                candidate[idx] = true;
            }

            let score = matrix.balance_score(&candidate);
            if best.as_ref().map_or(true, |(_, best_score)| score < *best_score) {
                best = Some((candidate.clone(), score));
            }

            if score < self.config.balance_tolerance {
                stop_reason = StopReason::ToleranceReached;
                break;
            }
        }

        let (assignment, score) =
            best.ok_or_else(|| Error::invalid("search budget allows no iterations"))?;

        debug!(
            search = self.name(),
            iterations,
            score,
            stop_reason = ?stop_reason,
            "Balance search finished"
        );

        Ok(SearchOutcome {
            assignment,
            score,
            iterations,
            stop_reason,
        })
    }
}
