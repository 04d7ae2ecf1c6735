//! Power and minimum-detectable-effect analysis for a formed split.
//!
//! Uses a two-sided normal-approximation test of a mean difference against
//! zero. The variance input is the per-unit `conversion_rate` spread of each
//! group; the sample sizes are the groups' total populations.

use tracing::debug;

use super::stats::{population_variance, StandardNormal};
use crate::config::EngineConfig;
use crate::domain::{StatisticalMetrics, TestGroup};
use crate::error::{Error, Result};

/// Interval coverage assumed for the design (not estimated).
pub const NOMINAL_COVERAGE: f64 = 0.95;

/// Shortest test duration [`PowerAnalyzer::test_duration_weeks`] recommends.
pub const MIN_TEST_WEEKS: u32 = 2;
/// Longest test duration [`PowerAnalyzer::test_duration_weeks`] recommends.
pub const MAX_TEST_WEEKS: u32 = 12;

/// Computes standard error, power and MDE for treatment/control groups.
#[derive(Debug, Clone)]
pub struct PowerAnalyzer {
    significance_level: f64,
    target_power: f64,
    strict_group_totals: bool,
    z_alpha: f64,
    z_beta: f64,
    normal: StandardNormal,
}

impl PowerAnalyzer {
    /// Analyzer using the engine's significance level and minimum power.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let mut analyzer = Self::with_levels(config.significance_level, config.min_power)?;
        analyzer.strict_group_totals = config.strict_group_totals;
        Ok(analyzer)
    }

    /// Analyzer for an explicit alpha and target power (1 - beta).
    pub fn with_levels(significance_level: f64, target_power: f64) -> Result<Self> {
        let normal = StandardNormal::new()?;
        let z_alpha = normal.quantile(1.0 - significance_level / 2.0)?;
        let z_beta = normal.quantile(target_power)?;
        Ok(Self {
            significance_level,
            target_power,
            strict_group_totals: false,
            z_alpha,
            z_beta,
            normal,
        })
    }

    #[must_use]
    pub const fn significance_level(&self) -> f64 {
        self.significance_level
    }

    #[must_use]
    pub const fn target_power(&self) -> f64 {
        self.target_power
    }

    /// Two-sided critical value `Phi^-1(1 - alpha/2)`.
    #[must_use]
    pub const fn z_alpha(&self) -> f64 {
        self.z_alpha
    }

    /// `Phi^-1(target_power)`.
    #[must_use]
    pub const fn z_beta(&self) -> f64 {
        self.z_beta
    }

    /// Power and MDE of `treatment` vs `control` for an assumed effect.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` if a group has no units or zero total population
    /// - `InvalidConfiguration` if `expected_effect` is not finite
    /// - `Domain(PopulationMismatch)` in strict mode when a group's total
    ///   disagrees with its members
    pub fn power(
        &self,
        treatment: &TestGroup,
        control: &TestGroup,
        expected_effect: f64,
    ) -> Result<StatisticalMetrics> {
        if !expected_effect.is_finite() {
            return Err(Error::invalid(format!(
                "expected effect must be finite, got {expected_effect}"
            )));
        }
        for group in [treatment, control] {
            if group.is_empty() {
                return Err(Error::insufficient(format!(
                    "{} group has no units",
                    group.group_type
                )));
            }
            if group.total_population == 0 {
                return Err(Error::insufficient(format!(
                    "{} group has zero population; standard error is undefined",
                    group.group_type
                )));
            }
            if self.strict_group_totals {
                group.verify_totals()?;
            }
        }

        let variance =
            (conversion_rate_variance(treatment) + conversion_rate_variance(control)) / 2.0;
        let se = self.standard_error(
            variance,
            treatment.total_population,
            control.total_population,
        );
        let mde = self.minimum_detectable_effect(se);
        let power = self.achieved_power(se, expected_effect);

        debug!(
            treatment_units = treatment.len(),
            control_units = control.len(),
            variance,
            se,
            power,
            mde,
            "Power analysis complete"
        );

        Ok(StatisticalMetrics {
            mse: se * se,
            variance,
            bias: 0.0,
            coverage: NOMINAL_COVERAGE,
            power,
            significance_level: self.significance_level,
            minimum_detectable_effect: mde,
        })
    }

    /// `sqrt(variance * (1/n_treatment + 1/n_control))`.
    #[must_use]
    pub fn standard_error(&self, variance: f64, n_treatment: u64, n_control: u64) -> f64 {
        (variance * (1.0 / n_treatment as f64 + 1.0 / n_control as f64)).sqrt()
    }

    /// `(z_alpha + z_beta) * se`.
    #[must_use]
    pub fn minimum_detectable_effect(&self, se: f64) -> f64 {
        (self.z_alpha + self.z_beta) * se
    }

    /// Two-sided power for `effect` given standard error `se`, in [0, 1].
    ///
    /// At `se == 0` the formula degenerates. The limiting values are used: any
    /// nonzero effect is detected with certainty, and a zero effect is
    /// rejected at exactly the significance level.
    #[must_use]
    pub fn achieved_power(&self, se: f64, effect: f64) -> f64 {
        if se == 0.0 {
            debug!(effect, "zero standard error, using limiting power");
            return if effect == 0.0 {
                self.significance_level
            } else {
                1.0
            };
        }
        let z_stat = effect / se;
        let power = 1.0 - self.normal.cdf(self.z_alpha - z_stat)
            + self.normal.cdf(-self.z_alpha - z_stat);
        power.clamp(0.0, 1.0)
    }

    /// Units needed per group to detect a relative `lift` over a conversion
    /// `base_rate` with a two-proportion test at this analyzer's alpha and
    /// target power.
    pub fn required_sample_size(&self, base_rate: f64, lift: f64) -> Result<u64> {
        if !(base_rate > 0.0 && base_rate < 1.0) {
            return Err(Error::invalid(format!(
                "base rate must be in (0, 1), got {base_rate}"
            )));
        }
        let lifted = base_rate * (1.0 + lift);
        if !lift.is_finite() || lift == 0.0 || !(lifted > 0.0 && lifted < 1.0) {
            return Err(Error::invalid(format!(
                "lift {lift} must be nonzero and keep the rate inside (0, 1)"
            )));
        }
        let pooled = (base_rate + lifted) / 2.0;
        let numerator = (self.z_alpha + self.z_beta).powi(2) * 2.0 * pooled * (1.0 - pooled);
        let denominator = (lifted - base_rate).powi(2);
        Ok((numerator / denominator).ceil() as u64)
    }

    /// Weeks of exposure for `population` to cover `min_sample_size`, on a
    /// yearly cycle, clamped to [`MIN_TEST_WEEKS`]..=[`MAX_TEST_WEEKS`].
    pub fn test_duration_weeks(min_sample_size: u64, population: u64) -> Result<u32> {
        if population == 0 {
            return Err(Error::insufficient("population is zero"));
        }
        let weeks = (min_sample_size as f64 / population as f64 * 52.0).ceil();
        Ok((weeks as u32).clamp(MIN_TEST_WEEKS, MAX_TEST_WEEKS))
    }
}

fn conversion_rate_variance(group: &TestGroup) -> f64 {
    let rates: Vec<f64> = group.units.iter().map(|u| u.conversion_rate).collect();
    population_variance(&rates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GroupType;
    use crate::testkit::domain::{group_with_rates, make_unit};

    fn analyzer() -> PowerAnalyzer {
        PowerAnalyzer::new(&EngineConfig::default()).unwrap()
    }

    #[test]
    fn critical_values_for_default_levels() {
        let a = analyzer();
        assert!((a.z_alpha() - 1.959_964).abs() < 1e-5);
        assert!((a.z_beta() - 0.841_621).abs() < 1e-5);
    }

    #[test]
    fn zero_variance_gives_certain_power() {
        let treatment = group_with_rates(GroupType::Treatment, &[5.0, 5.0], 100_000);
        let control = group_with_rates(GroupType::Control, &[5.0, 5.0], 100_000);
        let metrics = analyzer().power(&treatment, &control, 0.1).unwrap();

        assert_eq!(metrics.variance, 0.0);
        assert_eq!(metrics.mse, 0.0);
        assert_eq!(metrics.power, 1.0);
        assert_eq!(metrics.minimum_detectable_effect, 0.0);
        assert_eq!(metrics.bias, 0.0);
        assert_eq!(metrics.coverage, 0.95);
        assert_eq!(metrics.significance_level, 0.05);
    }

    #[test]
    fn zero_variance_zero_effect_is_alpha() {
        assert_eq!(analyzer().achieved_power(0.0, 0.0), 0.05);
    }

    #[test]
    fn zero_effect_power_is_alpha() {
        let power = analyzer().achieved_power(0.3, 0.0);
        assert!((power - 0.05).abs() < 1e-6);
    }

    #[test]
    fn effect_at_mde_has_target_power() {
        let a = analyzer();
        let se = 0.02;
        let power = a.achieved_power(se, a.minimum_detectable_effect(se));
        // The far tail adds a negligible amount above the target.
        assert!((power - 0.8).abs() < 1e-3);
    }

    #[test]
    fn variance_is_mean_of_group_variances() {
        // Treatment rates 1,3 -> var 1; control rates 2,6 -> var 4; pooled 2.5.
        let treatment = group_with_rates(GroupType::Treatment, &[1.0, 3.0], 50_000);
        let control = group_with_rates(GroupType::Control, &[2.0, 6.0], 50_000);
        let metrics = analyzer().power(&treatment, &control, 0.1).unwrap();

        assert!((metrics.variance - 2.5).abs() < 1e-12);
        let se = (2.5f64 * (1.0 / 100_000.0 + 1.0 / 100_000.0)).sqrt();
        assert!((metrics.mse - se * se).abs() < 1e-15);
    }

    #[test]
    fn zero_population_is_insufficient_data() {
        let mut treatment = group_with_rates(GroupType::Treatment, &[1.0, 3.0], 10);
        let control = group_with_rates(GroupType::Control, &[2.0, 6.0], 10);
        treatment.total_population = 0;
        assert!(matches!(
            analyzer().power(&treatment, &control, 0.1),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn empty_group_is_insufficient_data() {
        let treatment = group_with_rates(GroupType::Treatment, &[1.0], 10);
        let mut control = group_with_rates(GroupType::Control, &[2.0], 10);
        control.units.clear();
        assert!(matches!(
            analyzer().power(&treatment, &control, 0.1),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn strict_mode_checks_population_totals() {
        let config = EngineConfig {
            strict_group_totals: true,
            ..EngineConfig::default()
        };
        let strict = PowerAnalyzer::new(&config).unwrap();
        let mut treatment = group_with_rates(GroupType::Treatment, &[1.0, 2.0], 10);
        let control = group_with_rates(GroupType::Control, &[1.0, 2.0], 10);
        treatment.total_population += 1;

        assert!(matches!(
            strict.power(&treatment, &control, 0.1),
            Err(Error::Domain(_))
        ));
        assert!(analyzer().power(&treatment, &control, 0.1).is_ok());
    }

    #[test]
    fn required_sample_size_matches_closed_form() {
        // p1 = 0.05, p2 = 0.06, pooled 0.055.
        let a = analyzer();
        let n = a.required_sample_size(0.05, 0.2).unwrap();
        let z = a.z_alpha() + a.z_beta();
        let expected = (z * z * 2.0 * 0.055 * 0.945 / (0.01f64 * 0.01)).ceil() as i64;
        assert!((n as i64 - expected).abs() <= 1, "{n} vs {expected}");
        assert!(a.required_sample_size(0.0, 0.2).is_err());
        assert!(a.required_sample_size(0.05, 0.0).is_err());
        assert!(a.required_sample_size(0.9, 0.5).is_err());
    }

    #[test]
    fn test_duration_is_clamped() {
        assert_eq!(PowerAnalyzer::test_duration_weeks(100, 1_000_000).unwrap(), 2);
        assert_eq!(PowerAnalyzer::test_duration_weeks(10_000, 100_000).unwrap(), 6);
        assert_eq!(PowerAnalyzer::test_duration_weeks(1_000_000, 1_000).unwrap(), 12);
        assert!(PowerAnalyzer::test_duration_weeks(10, 0).is_err());
    }

    #[test]
    fn non_finite_effect_is_rejected() {
        let group =
            TestGroup::from_units(GroupType::Treatment, vec![make_unit("a", 10, 1.0)], 50.0)
                .unwrap();
        assert!(matches!(
            analyzer().power(&group, &group, f64::NAN),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
