//! Identifiers for catalog units and test groups.
//!
//! Both are opaque strings on the wire (`#[serde(transparent)]`), so a
//! catalog row's `id` column maps straight onto [`UnitId`].

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog key of a geographic unit: a ZIP, DMA or state code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UnitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lets a `HashSet<UnitId>` be probed with a plain `&str`.
impl Borrow<str> for UnitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UnitId {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for UnitId {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Handle of a treatment or control group.
///
/// Freshly formed groups get a random UUID; designs loaded back from a
/// store keep whatever id they were saved under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().hyphenated().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GroupId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for GroupId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}
