//! # mastery-analysis
//!
//! The posterior engine and its drivers.
//!
//! - [`posterior`]: conjugate Beta-Binomial update, Beta quantiles via
//!   incomplete-Beta inversion, credible intervals, tier categorization.
//! - [`engine`]: the per-record classifier, parallel batch classification,
//!   and the dense `(attempts, successes)` mastery grid.

pub mod engine;
pub mod posterior;

pub use engine::{ClassifiedRecord, GridCell, MasteryClassifier, MasteryGrid};
pub use posterior::{
    beta_quantile, categorize, compute_posterior, credible_interval, BetaPosterior,
    PosteriorResult,
};
