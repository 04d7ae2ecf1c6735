//! Integration tests for the quality validator.

use geolift::config::EngineConfig;
use geolift::domain::{BudgetConfig, GroupType, StatisticalMetrics};
use geolift::engine::QualityValidator;
use geolift::testkit::domain::group_with_rates;

fn metrics(power: f64) -> StatisticalMetrics {
    StatisticalMetrics {
        mse: 1e-6,
        variance: 0.5,
        bias: 0.0,
        coverage: 0.95,
        power,
        significance_level: 0.05,
        minimum_detectable_effect: 0.01,
    }
}

#[test]
fn small_population_flags_sample_size() {
    let treatment = group_with_rates(GroupType::Treatment, &[4.0, 4.0, 4.0], 1_000);
    let control = group_with_rates(GroupType::Control, &[4.0, 4.0], 1_000);
    let budget = BudgetConfig::new(5_000.0, 500.0, 10);

    let result = QualityValidator::new(&EngineConfig::default())
        .validate(&treatment, &control, &budget, &metrics(0.9))
        .unwrap();

    assert!(!result.sample_size_adequacy);
    assert!(result
        .warnings
        .iter()
        .any(|w| w == "Total population (5,000) below recommended minimum (10,000)"));
    assert!(result
        .recommendations
        .iter()
        .any(|r| r == "Include more geographic units or choose larger markets"));
    // 5 units x 40 conversions and $400 spend pass the other checks.
    assert!(result.power_adequacy);
    assert!(result.spend_adequacy);
    assert!(result.conversion_volume_adequacy);
}

#[test]
fn validation_is_deterministic() {
    let treatment = group_with_rates(GroupType::Treatment, &[1.0, 3.0, 7.5], 4_000);
    let control = group_with_rates(GroupType::Control, &[2.0, 0.0, 6.0], 3_000);
    let budget = BudgetConfig::new(1_000.0, 100.0, 10).with_min_spend_threshold(5_000.0);
    let validator = QualityValidator::new(&EngineConfig::default());

    let first = validator
        .validate(&treatment, &control, &budget, &metrics(0.42))
        .unwrap();
    let second = validator
        .validate(&treatment, &control, &budget, &metrics(0.42))
        .unwrap();

    assert_eq!(first.overall_quality_score, second.overall_quality_score);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.recommendations, second.recommendations);
    assert_eq!(first, second);
}

#[test]
fn custom_thresholds_change_verdict() {
    let treatment = group_with_rates(GroupType::Treatment, &[4.0, 4.0], 3_000);
    let control = group_with_rates(GroupType::Control, &[4.0, 4.0], 3_000);
    let budget = BudgetConfig::new(5_000.0, 500.0, 10);

    let mut config = EngineConfig::default();
    config.quality.min_population = 5_000;
    config.quality.min_conversions = 500;

    let result = QualityValidator::new(&config)
        .validate(&treatment, &control, &budget, &metrics(0.95))
        .unwrap();

    assert!(result.sample_size_adequacy);
    assert!(!result.conversion_volume_adequacy);
    assert_eq!(
        result.warnings,
        vec!["Conversion volume (160) too low for reliable measurement".to_string()]
    );
}

#[test]
fn scores_stay_within_bounds() {
    let treatment = group_with_rates(GroupType::Treatment, &[0.0, 10.0], 10);
    let control = group_with_rates(GroupType::Control, &[10.0, 0.0, 5.0], 10);
    let budget = BudgetConfig::new(0.0, 0.0, 0);

    for power in [0.0, 0.3, 0.8, 1.0] {
        let result = QualityValidator::new(&EngineConfig::default())
            .validate(&treatment, &control, &budget, &metrics(power))
            .unwrap();
        assert!((0.0..=100.0).contains(&result.balance_score));
        assert!((0.0..=100.0).contains(&result.overall_quality_score));
    }
}
