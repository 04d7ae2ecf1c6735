//! Domain validation errors for geographic units and test groups.
//!
//! These errors are returned by `try_new` constructors and by the
//! verification helpers on [`TestGroup`](super::TestGroup).
//!
//! # Examples
//!
//! ```
//! use geolift::domain::error::DomainError;
//! use geolift::domain::{GroupType, TestGroup};
//!
//! let result = TestGroup::from_units(GroupType::Treatment, vec![], 50.0);
//! assert!(matches!(result, Err(DomainError::EmptyGroup { .. })));
//! ```

use thiserror::Error;

use super::id::UnitId;
use super::GroupType;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Unit ids must be unique within a catalog.
    #[error("duplicate geographic unit id: {id}")]
    DuplicateUnitId {
        /// The repeated id.
        id: UnitId,
    },

    /// A group fed to the analyzers must have at least one member.
    #[error("{group_type} group has no units")]
    EmptyGroup {
        /// Which side of the test is empty.
        group_type: GroupType,
    },

    /// A caller-supplied population total disagrees with its members.
    #[error("{group_type} group reports population {reported}, members sum to {actual}")]
    PopulationMismatch {
        /// Which side of the test disagrees.
        group_type: GroupType,
        /// The `total_population` carried by the group.
        reported: u64,
        /// The sum over member units.
        actual: u64,
    },

    /// Historical metrics and rates cannot be negative or non-finite.
    #[error("{field} must be a non-negative finite number, got {value}")]
    NegativeValue {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A partition references a unit that is not in the catalog.
    #[error("unit {id} is not in the catalog")]
    UnknownUnitId {
        /// The id that could not be resolved.
        id: UnitId,
    },
}
