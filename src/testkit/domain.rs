//! Builders for geographic units, catalogs and groups used across tests.
//!
//! Provides concise factory functions so tests focus on assertions rather
//! than construction boilerplate.

use crate::domain::{GeoType, GeographicUnit, GroupType, HistoricalMetrics, TestGroup};

/// A ZIP unit with the given population and conversion rate.
///
/// Every other metric is fixed (40 conversions, $400 spend, $1,200 revenue,
/// CPM 9.0, CTR 1.1), so two units built with equal arguments are identical
/// apart from their ids.
pub fn make_unit(id: &str, population: u64, conversion_rate: f64) -> GeographicUnit {
    GeographicUnit {
        id: id.into(),
        name: format!("Unit {id}"),
        geo_type: GeoType::Zip,
        population,
        historical_conversions: 40,
        historical_spend: 400.0,
        historical_revenue: 1_200.0,
        conversion_rate,
        cpm: 9.0,
        ctr: 1.1,
    }
}

/// `n` units with identical metrics (population 50,000, conversion rate 5.0).
pub fn uniform_catalog(n: usize) -> Vec<GeographicUnit> {
    (0..n)
        .map(|i| make_unit(&format!("u{i}"), 50_000, 5.0))
        .collect()
}

/// `n` deterministic units whose metrics vary from unit to unit.
pub fn varied_catalog(n: usize) -> Vec<GeographicUnit> {
    (0..n)
        .map(|i| {
            let k = i as u64;
            let spread = ((k * 7) % 11) as f64;
            GeographicUnit {
                id: format!("v{i}").into(),
                name: format!("Market {i}"),
                geo_type: GeoType::Dma,
                population: 20_000 + (k * 3_761) % 40_000,
                historical_conversions: 30 + (k * 13) % 90,
                historical_spend: 800.0 + spend_curve(i),
                historical_revenue: 2_400.0 + 3.1 * spend_curve(i) + 50.0 * spread,
                conversion_rate: 1.5 + 0.35 * spread,
                cpm: 6.0 + ((k * 5) % 9) as f64,
                ctr: 0.6 + 0.12 * ((k * 3) % 10) as f64,
            }
        })
        .collect()
}

fn spend_curve(i: usize) -> f64 {
    ((i * 37) % 23) as f64 * 45.0
}

/// A group with one unit per rate, each unit having `population_per_unit`.
pub fn group_with_rates(
    group_type: GroupType,
    rates: &[f64],
    population_per_unit: u64,
) -> TestGroup {
    let prefix = match group_type {
        GroupType::Treatment => "t",
        GroupType::Control => "c",
    };
    let units = rates
        .iter()
        .enumerate()
        .map(|(i, rate)| make_unit(&format!("{prefix}{i}"), population_per_unit, *rate))
        .collect::<Vec<_>>();
    TestGroup {
        group_id: format!("{group_type}-group").into(),
        group_type,
        total_population: population_per_unit * rates.len() as u64,
        historical_metrics: HistoricalMetrics::from_units(&units),
        units,
        allocation_percentage: 50.0,
    }
}
