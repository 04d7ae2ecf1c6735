//! Geographic units and the metrics the engine balances on.
//!
//! A [`GeographicUnit`] is one addressable geography (ZIP code, DMA, state)
//! together with its historical advertising performance. Units are supplied
//! by the caller; the engine only ever borrows them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::UnitId;

/// Granularity of a geographic unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoType {
    /// Postal ZIP code.
    Zip,
    /// Designated Market Area.
    Dma,
    /// US state.
    State,
}

impl fmt::Display for GeoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zip => "zip",
            Self::Dma => "dma",
            Self::State => "state",
        };
        f.write_str(name)
    }
}

/// One addressable geography and its historical performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicUnit {
    pub id: UnitId,
    pub name: String,
    #[serde(rename = "type")]
    pub geo_type: GeoType,
    pub population: u64,
    pub historical_conversions: u64,
    pub historical_spend: f64,
    pub historical_revenue: f64,
    pub conversion_rate: f64,
    pub cpm: f64,
    pub ctr: f64,
}

impl GeographicUnit {
    /// Create a unit, rejecting negative or non-finite float fields.
    ///
    /// Integer fields are unsigned, so only the float fields need checking.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        id: impl Into<UnitId>,
        name: impl Into<String>,
        geo_type: GeoType,
        population: u64,
        historical_conversions: u64,
        historical_spend: f64,
        historical_revenue: f64,
        conversion_rate: f64,
        cpm: f64,
        ctr: f64,
    ) -> Result<Self, DomainError> {
        let unit = Self {
            id: id.into(),
            name: name.into(),
            geo_type,
            population,
            historical_conversions,
            historical_spend,
            historical_revenue,
            conversion_rate,
            cpm,
            ctr,
        };
        unit.validate()?;
        Ok(unit)
    }

    /// Check the float fields of a unit that was built or deserialized directly.
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("historical_spend", self.historical_spend),
            ("historical_revenue", self.historical_revenue),
            ("conversion_rate", self.conversion_rate),
            ("cpm", self.cpm),
            ("ctr", self.ctr),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::NegativeValue { field, value });
            }
        }
        Ok(())
    }

    /// Value of one balance metric for this unit.
    #[must_use]
    pub fn metric(&self, metric: UnitMetric) -> f64 {
        match metric {
            UnitMetric::Population => self.population as f64,
            UnitMetric::Conversions => self.historical_conversions as f64,
            UnitMetric::Spend => self.historical_spend,
            UnitMetric::Revenue => self.historical_revenue,
            UnitMetric::ConversionRate => self.conversion_rate,
            UnitMetric::Cpm => self.cpm,
            UnitMetric::Ctr => self.ctr,
        }
    }
}

/// The seven unit metrics the balance search compares, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitMetric {
    Population,
    Conversions,
    Spend,
    Revenue,
    ConversionRate,
    Cpm,
    Ctr,
}

impl UnitMetric {
    /// All metrics in feature-matrix column order.
    pub const ALL: [Self; 7] = [
        Self::Population,
        Self::Conversions,
        Self::Spend,
        Self::Revenue,
        Self::ConversionRate,
        Self::Cpm,
        Self::Ctr,
    ];

    /// Key used for this metric in `balance_metrics` maps.
    #[must_use]
    pub const fn balance_key(self) -> &'static str {
        match self {
            Self::Population => "population_balance",
            Self::Conversions => "conversions_balance",
            Self::Spend => "spend_balance",
            Self::Revenue => "revenue_balance",
            Self::ConversionRate => "conv_rate_balance",
            Self::Cpm => "cpm_balance",
            Self::Ctr => "ctr_balance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> GeographicUnit {
        GeographicUnit::try_new(
            "10001", "New York", GeoType::Zip, 21_000, 120, 5_000.0, 18_000.0, 2.5, 8.0, 1.2,
        )
        .unwrap()
    }

    #[test]
    fn metric_reads_each_column() {
        let u = unit();
        let values: Vec<f64> = UnitMetric::ALL.iter().map(|m| u.metric(*m)).collect();
        assert_eq!(values, vec![21_000.0, 120.0, 5_000.0, 18_000.0, 2.5, 8.0, 1.2]);
    }

    #[test]
    fn try_new_rejects_negative_spend() {
        let result = GeographicUnit::try_new(
            "x", "x", GeoType::Dma, 1, 1, -1.0, 0.0, 0.0, 0.0, 0.0,
        );
        assert!(matches!(
            result,
            Err(DomainError::NegativeValue {
                field: "historical_spend",
                ..
            })
        ));
    }

    #[test]
    fn try_new_rejects_nan_rate() {
        let result = GeographicUnit::try_new(
            "x", "x", GeoType::State, 1, 1, 0.0, 0.0, f64::NAN, 0.0, 0.0,
        );
        assert!(matches!(
            result,
            Err(DomainError::NegativeValue {
                field: "conversion_rate",
                ..
            })
        ));
    }

    #[test]
    fn type_field_serializes_lowercase() {
        let json = serde_json::to_value(unit()).unwrap();
        assert_eq!(json["type"], "zip");
        assert_eq!(json["id"], "10001");
    }
}
