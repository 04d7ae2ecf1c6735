//! Integration tests for the power analyzer.

use geolift::config::EngineConfig;
use geolift::domain::GroupType;
use geolift::engine::PowerAnalyzer;
use geolift::error::Error;
use geolift::testkit::domain::group_with_rates;
use proptest::prelude::*;

fn analyzer() -> PowerAnalyzer {
    PowerAnalyzer::new(&EngineConfig::default()).unwrap()
}

#[test]
fn zero_variance_groups_of_200k_have_full_power() {
    let treatment = group_with_rates(GroupType::Treatment, &[5.0, 5.0, 5.0, 5.0], 50_000);
    let control = group_with_rates(GroupType::Control, &[5.0, 5.0, 5.0, 5.0], 50_000);
    assert_eq!(treatment.total_population, 200_000);

    let metrics = analyzer().power(&treatment, &control, 0.1).unwrap();

    assert_eq!(metrics.power, 1.0);
    assert!(metrics.power.is_finite());
    assert_eq!(metrics.minimum_detectable_effect, 0.0);
}

#[test]
fn mde_shrinks_as_population_grows() {
    let rates_t = [2.0, 3.5, 4.0, 6.0];
    let rates_c = [2.5, 3.0, 5.0, 5.5];
    let mut previous = f64::INFINITY;

    for population in [1_000, 10_000, 50_000, 250_000, 1_000_000] {
        let treatment = group_with_rates(GroupType::Treatment, &rates_t, population);
        let control = group_with_rates(GroupType::Control, &rates_c, population);
        let metrics = analyzer().power(&treatment, &control, 0.05).unwrap();

        assert!(
            metrics.minimum_detectable_effect < previous,
            "population {population}: {} !< {previous}",
            metrics.minimum_detectable_effect
        );
        previous = metrics.minimum_detectable_effect;
    }
}

#[test]
fn power_grows_with_effect_size() {
    let treatment = group_with_rates(GroupType::Treatment, &[2.0, 4.0, 6.0], 5_000);
    let control = group_with_rates(GroupType::Control, &[3.0, 4.0, 5.0], 5_000);
    let a = analyzer();

    let small = a.power(&treatment, &control, 0.01).unwrap().power;
    let large = a.power(&treatment, &control, 0.2).unwrap().power;
    assert!(large > small);
}

#[test]
fn stricter_alpha_raises_mde() {
    let treatment = group_with_rates(GroupType::Treatment, &[2.0, 4.0], 5_000);
    let control = group_with_rates(GroupType::Control, &[3.0, 5.0], 5_000);

    let loose = PowerAnalyzer::with_levels(0.10, 0.8).unwrap();
    let strict = PowerAnalyzer::with_levels(0.01, 0.8).unwrap();

    let loose_mde = loose.power(&treatment, &control, 0.1).unwrap().minimum_detectable_effect;
    let strict_mde = strict.power(&treatment, &control, 0.1).unwrap().minimum_detectable_effect;
    assert!(strict_mde > loose_mde);
}

#[test]
fn invalid_levels_are_rejected() {
    assert!(matches!(
        PowerAnalyzer::with_levels(0.05, 1.0),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        PowerAnalyzer::with_levels(2.0, 0.8),
        Err(Error::InvalidConfiguration { .. })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn power_and_mde_stay_in_bounds(
        rates_t in prop::collection::vec(0.0f64..20.0, 1..8),
        rates_c in prop::collection::vec(0.0f64..20.0, 1..8),
        population in 1u64..2_000_000,
        effect in -5.0f64..5.0,
    ) {
        let treatment = group_with_rates(GroupType::Treatment, &rates_t, population);
        let control = group_with_rates(GroupType::Control, &rates_c, population);
        let metrics = analyzer().power(&treatment, &control, effect).unwrap();

        prop_assert!((0.0..=1.0).contains(&metrics.power));
        prop_assert!(metrics.minimum_detectable_effect >= 0.0);
        prop_assert!(metrics.mse >= 0.0);
        prop_assert_eq!(metrics.bias, 0.0);
        prop_assert_eq!(metrics.coverage, 0.95);
    }
}
