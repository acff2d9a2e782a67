//! Tier threshold configuration.

use serde::{Deserialize, Serialize};

use crate::types::settings::{DEFAULT_CONFIDENCE, DEFAULT_FAMILIAR, DEFAULT_PROFICIENT};

/// Cut-offs on the lower credible bound and the credible mass.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Lower bound needed for "Familiar". Default: 0.3.
    pub familiar: Option<f64>,
    /// Lower bound needed for "Proficient". Default: 0.5.
    pub proficient: Option<f64>,
    /// Central credible interval mass. Default: 0.8.
    pub confidence: Option<f64>,
}

impl ThresholdConfig {
    pub fn effective_familiar(&self) -> f64 {
        self.familiar.unwrap_or(DEFAULT_FAMILIAR)
    }

    pub fn effective_proficient(&self) -> f64 {
        self.proficient.unwrap_or(DEFAULT_PROFICIENT)
    }

    pub fn effective_confidence(&self) -> f64 {
        self.confidence.unwrap_or(DEFAULT_CONFIDENCE)
    }
}
