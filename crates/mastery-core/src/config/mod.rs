//! Configuration system for the mastery classifier.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod batch_config;
pub mod mastery_config;
pub mod prior_config;
pub mod solver_config;
pub mod threshold_config;

pub use batch_config::BatchConfig;
pub use mastery_config::{CliOverrides, MasteryConfig};
pub use prior_config::PriorConfig;
pub use solver_config::SolverConfig;
pub use threshold_config::ThresholdConfig;
