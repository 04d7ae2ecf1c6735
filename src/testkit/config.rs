//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::config::{EngineConfig, SearchConfig};

/// Default engine config with a fixed search seed.
pub fn seeded_engine(seed: u64) -> EngineConfig {
    EngineConfig {
        search: SearchConfig {
            seed: Some(seed),
            ..SearchConfig::default()
        },
        ..EngineConfig::default()
    }
}

/// Seeded engine config whose search never stops early, so every run uses
/// exactly `max_iterations` candidates.
pub fn exhaustive_search(seed: u64, max_iterations: usize) -> EngineConfig {
    EngineConfig {
        search: SearchConfig {
            max_iterations,
            balance_tolerance: 0.0,
            seed: Some(seed),
        },
        ..EngineConfig::default()
    }
}
