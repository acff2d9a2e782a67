//! Mastery tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordered mastery categories: `Attempted < Familiar < Proficient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MasteryTier {
    /// Lower credible bound below the familiar threshold.
    Attempted,
    /// Lower credible bound at or above the familiar threshold.
    Familiar,
    /// Lower credible bound at or above the proficient threshold.
    Proficient,
}

impl MasteryTier {
    /// All tiers in ascending order.
    pub const ALL: [MasteryTier; 3] = [Self::Attempted, Self::Familiar, Self::Proficient];

    /// Tier name as written to output records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Attempted => "Attempted",
            Self::Familiar => "Familiar",
            Self::Proficient => "Proficient",
        }
    }
}

impl fmt::Display for MasteryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MasteryTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mastery tier: {s}"))
    }
}
