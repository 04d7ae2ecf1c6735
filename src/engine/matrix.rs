//! Feature matrix and balance scoring for candidate assignments.
//!
//! One row per unit, one column per [`UnitMetric`] in [`UnitMetric::ALL`]
//! order. Column scales are the population standard deviations over all
//! units and are computed once, so scoring a candidate only needs the two
//! side means.

use std::collections::BTreeMap;

use tracing::debug;

use super::stats::population_std_dev;
use crate::domain::{GeographicUnit, UnitMetric};

const COLUMNS: usize = UnitMetric::ALL.len();

type Row = [f64; COLUMNS];

#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    rows: Vec<Row>,
    scales: Row,
    constant: [bool; COLUMNS],
}

impl FeatureMatrix {
    pub fn from_units(units: &[GeographicUnit]) -> Self {
        let rows: Vec<Row> = units
            .iter()
            .map(|unit| UnitMetric::ALL.map(|metric| unit.metric(metric)))
            .collect();

        let mut scales = [1.0; COLUMNS];
        let mut constant = [false; COLUMNS];
        for (col, metric) in UnitMetric::ALL.iter().enumerate() {
            let column: Vec<f64> = rows.iter().map(|row| row[col]).collect();
            let std_dev = population_std_dev(&column);
            if is_constant(&column, std_dev) {
                // Any split is balanced on this column; rounding noise in the
                // side means must not count.
                constant[col] = true;
                debug!(metric = ?metric, std_dev, "zero spread, column ignored");
            } else {
                scales[col] = std_dev;
            }
        }

        Self {
            rows,
            scales,
            constant,
        }
    }

    /// Number of units (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per-column divisors used by [`balance_score`](Self::balance_score).
    pub fn scales(&self) -> &[f64; COLUMNS] {
        &self.scales
    }

    /// Mean standardized absolute difference between treatment and control
    /// means. Lower is better; infinite when either side is empty.
    ///
    /// `assignment[i]` is true when unit `i` is in treatment.
    pub fn balance_score(&self, assignment: &[bool]) -> f64 {
        let Some((treatment, control)) = self.side_means(assignment) else {
            return f64::INFINITY;
        };
        let total: f64 = (0..COLUMNS)
            .filter(|&col| !self.constant[col])
            .map(|col| (treatment[col] - control[col]).abs() / self.scales[col])
            .sum();
        total / COLUMNS as f64
    }

    /// Percentage difference of each metric's treatment mean relative to its
    /// control mean, keyed by [`UnitMetric::balance_key`].
    ///
    /// A zero control mean or a constant column yields 0. Returns `None` when
    /// either side is empty.
    pub fn balance_metrics(&self, assignment: &[bool]) -> Option<BTreeMap<String, f64>> {
        let (treatment, control) = self.side_means(assignment)?;
        let metrics = UnitMetric::ALL
            .iter()
            .enumerate()
            .map(|(col, metric)| {
                let pct = if self.constant[col] || control[col] == 0.0 {
                    0.0
                } else {
                    (treatment[col] - control[col]).abs() / control[col] * 100.0
                };
                (metric.balance_key().to_string(), pct)
            })
            .collect();
        Some(metrics)
    }

    fn side_means(&self, assignment: &[bool]) -> Option<(Row, Row)> {
        debug_assert_eq!(assignment.len(), self.rows.len());

        let mut treatment = [0.0; COLUMNS];
        let mut control = [0.0; COLUMNS];
        let mut n_treatment = 0usize;
        let mut n_control = 0usize;

        for (row, &treated) in self.rows.iter().zip(assignment) {
            let (sums, count) = if treated {
                (&mut treatment, &mut n_treatment)
            } else {
                (&mut control, &mut n_control)
            };
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
            *count += 1;
        }

        if n_treatment == 0 || n_control == 0 {
            return None;
        }
        for col in 0..COLUMNS {
            treatment[col] /= n_treatment as f64;
            control[col] /= n_control as f64;
        }
        Some((treatment, control))
    }
}

/// True when every value is equal, or the spread is below float resolution
/// relative to the largest magnitude.
fn is_constant(column: &[f64], std_dev: f64) -> bool {
    let Some(first) = column.first() else {
        return true;
    };
    if column.iter().all(|v| v == first) {
        return true;
    }
    let max_abs = column.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    std_dev <= f64::EPSILON * max_abs
}
