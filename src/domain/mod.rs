//! Plain data records the engine consumes and produces.

pub mod error;
pub mod id;

mod budget;
mod group;
mod metrics;
mod unit;

pub use budget::{AllocationMethod, BudgetConfig};
pub use group::{GroupType, HistoricalMetrics, TestGroup};
pub use id::{GroupId, UnitId};
pub use metrics::{QualityIndicators, StatisticalMetrics};
pub use unit::{GeoType, GeographicUnit, UnitMetric};
