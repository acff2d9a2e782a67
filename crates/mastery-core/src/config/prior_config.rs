//! Prior configuration.

use serde::{Deserialize, Serialize};

use crate::types::settings::{DEFAULT_ALPHA_PRIOR, DEFAULT_BETA_PRIOR};

/// Beta prior applied to every group in a run.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PriorConfig {
    /// Prior pseudo-successes. Default: 2.0.
    pub alpha: Option<f64>,
    /// Prior pseudo-failures. Default: 2.0.
    pub beta: Option<f64>,
}

impl PriorConfig {
    pub fn effective_alpha(&self) -> f64 {
        self.alpha.unwrap_or(DEFAULT_ALPHA_PRIOR)
    }

    pub fn effective_beta(&self) -> f64 {
        self.beta.unwrap_or(DEFAULT_BETA_PRIOR)
    }
}
