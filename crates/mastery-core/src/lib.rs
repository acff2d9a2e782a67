//! # mastery-core
//!
//! Shared foundation for the mastery classifier: domain types, the layered
//! configuration system, per-subsystem error enums, and tracing setup.
//! Nothing in this crate does numerics; the posterior engine lives in
//! `mastery-analysis`.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::MasteryConfig;
pub use errors::{ConfigError, EngineError, PipelineError, PipelineResult};
pub use types::{
    EngineSettings, GroupObservation, MasteryTier, PriorParameters, SolverSettings, Thresholds,
};
