//! Small descriptive-statistics helpers and the standard normal distribution.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{Error, Result};

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by `n`); 0 for an empty slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Standard normal distribution N(0, 1).
#[derive(Debug, Clone)]
pub struct StandardNormal {
    inner: Normal,
}

impl StandardNormal {
    pub fn new() -> Result<Self> {
        let inner = Normal::new(0.0, 1.0)
            .map_err(|e| Error::invalid(format!("standard normal: {e}")))?;
        Ok(Self { inner })
    }

    /// Phi(x).
    pub fn cdf(&self, x: f64) -> f64 {
        self.inner.cdf(x)
    }

    /// Phi^-1(p). `p` must lie strictly inside (0, 1).
    pub fn quantile(&self, p: f64) -> Result<f64> {
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::invalid(format!(
                "normal quantile requires 0 < p < 1, got {p}"
            )));
        }
        Ok(self.inner.inverse_cdf(p))
    }
}
