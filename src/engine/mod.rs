//! Statistical matching engine.
//!
//! Three independent, synchronous computations:
//!
//! - [`BalanceOptimizer`] - splits a catalog into balanced treatment/control
//! - [`PowerAnalyzer`] - standard error, power and MDE of a formed split
//! - [`QualityValidator`] - adequacy checks folded into a composite score
//!
//! None of them calls another. A caller typically runs them in that order:
//!
//! ```
//! use geolift::config::EngineConfig;
//! use geolift::domain::BudgetConfig;
//! use geolift::engine::MatchingEngine;
//! # use geolift::domain::{GeographicUnit, GeoType};
//! # let units: Vec<GeographicUnit> = (0..10)
//! #     .map(|i| GeographicUnit::try_new(
//! #         format!("z{i}"), "zip", GeoType::Zip, 50_000, 30, 400.0, 1_200.0, 5.0, 9.0, 1.1,
//! #     ).unwrap())
//! #     .collect();
//!
//! let engine = MatchingEngine::new(EngineConfig::default())?;
//! let split = engine.optimize(&units, 0.5, &[])?;
//! let (treatment, control) = split.form_groups(&units)?;
//! let metrics = engine.power(&treatment, &control, 0.1)?;
//! let budget = BudgetConfig::new(20_000.0, 1_000.0, 20);
//! let verdict = engine.validate(&treatment, &control, &budget, &metrics)?;
//! assert!(verdict.overall_quality_score <= 100.0);
//! # Ok::<(), geolift::error::Error>(())
//! ```

mod facade;
mod matrix;
mod optimizer;
mod power;
mod quality;
mod search;
mod stats;

pub use facade::MatchingEngine;
pub use matrix::FeatureMatrix;
pub use optimizer::{treatment_size, BalanceOptimizer, OptimizationRequest, OptimizationResult};
pub use power::{PowerAnalyzer, MAX_TEST_WEEKS, MIN_TEST_WEEKS, NOMINAL_COVERAGE};
pub use quality::QualityValidator;
pub use search::RandomRestartSearch;
