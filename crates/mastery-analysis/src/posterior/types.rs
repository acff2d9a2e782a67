//! Output of one posterior evaluation.

use serde::{Deserialize, Serialize};

use mastery_core::types::MasteryTier;

/// Posterior parameters, summary statistics and the decided tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PosteriorResult {
    pub post_alpha: f64,
    pub post_beta: f64,
    pub post_mean: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub label: MasteryTier,
}
