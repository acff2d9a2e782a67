//! Quantile solver configuration.

use serde::{Deserialize, Serialize};

use crate::types::settings::{DEFAULT_SOLVER_MAX_ITERATIONS, DEFAULT_SOLVER_TOLERANCE};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    /// Tolerance on the quantile, relative to its value. Default: 1e-12.
    pub tolerance: Option<f64>,
    /// Iteration budget before reporting non-convergence. Default: 200.
    pub max_iterations: Option<u32>,
}

impl SolverConfig {
    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_SOLVER_TOLERANCE)
    }

    pub fn effective_max_iterations(&self) -> u32 {
        self.max_iterations.unwrap_or(DEFAULT_SOLVER_MAX_ITERATIONS)
    }
}
