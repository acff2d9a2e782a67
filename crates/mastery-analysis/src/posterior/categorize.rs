//! Lower-bound tier categorization.

use mastery_core::types::{MasteryTier, Thresholds};

/// Map the lower credible bound to a tier.
///
/// Intervals are closed below: a bound exactly on a threshold takes the
/// higher tier. NaN compares false everywhere and lands in `Attempted`.
pub fn categorize(ci_low: f64, thresholds: &Thresholds) -> MasteryTier {
    if ci_low >= thresholds.proficient {
        MasteryTier::Proficient
    } else if ci_low >= thresholds.familiar {
        MasteryTier::Familiar
    } else {
        MasteryTier::Attempted
    }
}
