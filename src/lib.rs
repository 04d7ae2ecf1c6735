//! Geolift - statistical matching engine for geographic lift tests.
//!
//! A lift test measures advertising effectiveness by treating some regions
//! (ZIP codes, media markets, states) and holding others out. This crate
//! designs such tests from a catalog of candidate regions.
//!
//! # Architecture
//!
//! - **`engine::BalanceOptimizer`** - Randomized search for a treatment/control
//!   partition minimizing the mean standardized difference over seven metrics
//! - **`engine::PowerAnalyzer`** - Standard error, power and minimum detectable
//!   effect of a split under a two-sided normal approximation
//! - **`engine::QualityValidator`** - Five adequacy checks folded into one
//!   0-100 quality score with warnings and recommendations
//!
//! - **`port::AssignmentSearch`** - Search backend abstraction
//!   - `RandomRestartSearch` - Multi-start random sampling (default)
//!
//! The engine performs no I/O and keeps no state between calls. Fetching
//! demographic data, persisting designs and serving requests are left to the
//! embedding application.
//!
//! # Modules
//!
//! - [`config`] - Engine thresholds and logging, loadable from TOML
//! - [`domain`] - Geographic units, test groups, budget and result records
//! - [`engine`] - The three algorithms and the [`engine::MatchingEngine`] facade
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for pluggable search backends
//!
//! # Example
//!
//! ```
//! use geolift::config::EngineConfig;
//! use geolift::engine::MatchingEngine;
//!
//! let engine = MatchingEngine::new(EngineConfig::default()).unwrap();
//! assert_eq!(engine.config().search.max_iterations, 10_000);
//! ```

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
