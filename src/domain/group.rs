//! Treatment and control cohorts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::GroupId;
use super::unit::GeographicUnit;

/// Side of the experiment a group sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Treatment,
    Control,
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Treatment => f.write_str("treatment"),
            Self::Control => f.write_str("control"),
        }
    }
}

/// Aggregate historical performance of a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalMetrics {
    pub conversions: f64,
    pub spend: f64,
    pub revenue: f64,
}

impl HistoricalMetrics {
    /// Sum conversions, spend and revenue over `units`.
    #[must_use]
    pub fn from_units(units: &[GeographicUnit]) -> Self {
        units.iter().fold(Self::default(), |acc, unit| Self {
            conversions: acc.conversions + unit.historical_conversions as f64,
            spend: acc.spend + unit.historical_spend,
            revenue: acc.revenue + unit.historical_revenue,
        })
    }
}

/// A treatment or control cohort of geographic units.
///
/// `total_population` is carried as supplied. Groups built with
/// [`TestGroup::from_units`] compute it from their members; groups
/// deserialized from a caller can be checked with [`TestGroup::verify_totals`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestGroup {
    pub group_id: GroupId,
    pub group_type: GroupType,
    pub units: Vec<GeographicUnit>,
    pub total_population: u64,
    pub historical_metrics: HistoricalMetrics,
    pub allocation_percentage: f64,
}

impl TestGroup {
    /// Build a group from its members, computing totals eagerly.
    pub fn from_units(
        group_type: GroupType,
        units: Vec<GeographicUnit>,
        allocation_percentage: f64,
    ) -> Result<Self, DomainError> {
        if units.is_empty() {
            return Err(DomainError::EmptyGroup { group_type });
        }
        Ok(Self {
            group_id: GroupId::generate(),
            group_type,
            total_population: saturating_total(units.iter().map(|u| u.population)),
            historical_metrics: HistoricalMetrics::from_units(&units),
            units,
            allocation_percentage,
        })
    }

    /// Replace the generated group id.
    #[must_use]
    pub fn with_id(mut self, group_id: impl Into<GroupId>) -> Self {
        self.group_id = group_id.into();
        self
    }

    /// Number of member units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Combined historical spend of member units.
    #[must_use]
    pub fn historical_spend(&self) -> f64 {
        self.units.iter().map(|u| u.historical_spend).sum()
    }

    /// Combined historical conversions of member units.
    #[must_use]
    pub fn historical_conversions(&self) -> u64 {
        saturating_total(self.units.iter().map(|u| u.historical_conversions))
    }

    /// Check that `total_population` equals the sum over members.
    pub fn verify_totals(&self) -> Result<(), DomainError> {
        let actual = saturating_total(self.units.iter().map(|u| u.population));
        if actual != self.total_population {
            return Err(DomainError::PopulationMismatch {
                group_type: self.group_type,
                reported: self.total_population,
                actual,
            });
        }
        Ok(())
    }
}

/// Sum that pins at `u64::MAX` instead of wrapping.
pub(crate) fn saturating_total(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, u64::saturating_add)
}
