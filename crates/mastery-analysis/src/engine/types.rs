//! Output records produced by the drivers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mastery_core::types::{GroupObservation, MasteryTier};

use crate::posterior::PosteriorResult;

/// One classified group, flattened for tabular sinks.
///
/// Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub group_id: String,
    pub attempts: u64,
    pub successes: u64,
    pub post_alpha: f64,
    pub post_beta: f64,
    pub post_mean: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub label: MasteryTier,
}

impl ClassifiedRecord {
    pub fn new(observation: &GroupObservation, result: PosteriorResult) -> Self {
        Self {
            group_id: observation.group_id.clone(),
            attempts: observation.attempts,
            successes: observation.successes,
            post_alpha: result.post_alpha,
            post_beta: result.post_beta,
            post_mean: result.post_mean,
            ci_low: result.ci_low,
            ci_high: result.ci_high,
            label: result.label,
        }
    }
}

/// One `(attempts, successes)` cell of a mastery grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub attempts: u64,
    pub successes: u64,
    pub ci_low: f64,
    pub label: MasteryTier,
}

/// Count labels; every tier is present, possibly with zero.
pub fn tier_counts<I>(labels: I) -> BTreeMap<MasteryTier, usize>
where
    I: IntoIterator<Item = MasteryTier>,
{
    let mut counts: BTreeMap<MasteryTier, usize> =
        MasteryTier::ALL.into_iter().map(|tier| (tier, 0)).collect();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    counts
}
