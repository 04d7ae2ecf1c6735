//! Configuration: engine thresholds, search settings, and logging.

mod engine;
mod logging;
mod settings;

pub use engine::{EngineConfig, QualityThresholds, SearchConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use settings::Config;
