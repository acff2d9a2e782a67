//! Validated engine settings produced by the configuration layer.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const DEFAULT_ALPHA_PRIOR: f64 = 2.0;
pub const DEFAULT_BETA_PRIOR: f64 = 2.0;
pub const DEFAULT_FAMILIAR: f64 = 0.3;
pub const DEFAULT_PROFICIENT: f64 = 0.5;
pub const DEFAULT_CONFIDENCE: f64 = 0.8;
pub const DEFAULT_SOLVER_TOLERANCE: f64 = 1e-12;
pub const DEFAULT_SOLVER_MAX_ITERATIONS: u32 = 200;

/// Beta prior over the success probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorParameters {
    pub alpha: f64,
    pub beta: f64,
}

impl PriorParameters {
    pub fn new(alpha: f64, beta: f64) -> Result<Self, ConfigError> {
        positive("prior.alpha", alpha)?;
        positive("prior.beta", beta)?;
        Ok(Self { alpha, beta })
    }

    /// Prior mean, `alpha / (alpha + beta)`.
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }
}

impl Default for PriorParameters {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA_PRIOR,
            beta: DEFAULT_BETA_PRIOR,
        }
    }
}

/// Tier cut-offs applied to the lower credible bound, plus the interval width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub familiar: f64,
    pub proficient: f64,
    /// Central credible mass, strictly inside (0, 1).
    pub confidence: f64,
}

impl Thresholds {
    /// Validated constructor. Rejects `familiar > proficient`, which would
    /// make the tier order non-monotonic.
    pub fn new(familiar: f64, proficient: f64, confidence: f64) -> Result<Self, ConfigError> {
        unit_interval("thresholds.familiar", familiar)?;
        unit_interval("thresholds.proficient", proficient)?;
        if familiar > proficient {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds.familiar".to_string(),
                message: format!(
                    "familiar ({familiar}) must not exceed proficient ({proficient})"
                ),
            });
        }
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds.confidence".to_string(),
                message: format!("must be strictly between 0.0 and 1.0, got {confidence}"),
            });
        }
        Ok(Self {
            familiar,
            proficient,
            confidence,
        })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            familiar: DEFAULT_FAMILIAR,
            proficient: DEFAULT_PROFICIENT,
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

/// Budget for the Beta quantile root finder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Tolerance on the quantile, relative to its value.
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl SolverSettings {
    pub fn new(tolerance: f64, max_iterations: u32) -> Result<Self, ConfigError> {
        positive("solver.tolerance", tolerance)?;
        if max_iterations == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "solver.max_iterations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_SOLVER_TOLERANCE,
            max_iterations: DEFAULT_SOLVER_MAX_ITERATIONS,
        }
    }
}

/// Everything a classifier needs, resolved once per run and shared read-only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineSettings {
    pub prior: PriorParameters,
    pub thresholds: Thresholds,
    pub solver: SolverSettings,
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("must be a positive finite number, got {value}"),
        })
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("must be between 0.0 and 1.0, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let s = EngineSettings::default();
        assert_eq!(s.prior.alpha, 2.0);
        assert_eq!(s.prior.beta, 2.0);
        assert_eq!(s.thresholds.familiar, 0.3);
        assert_eq!(s.thresholds.proficient, 0.5);
        assert_eq!(s.thresholds.confidence, 0.8);
    }

    #[test]
    fn test_prior_must_be_positive() {
        assert!(PriorParameters::new(0.0, 1.0).is_err());
        assert!(PriorParameters::new(1.0, -2.0).is_err());
        assert!(PriorParameters::new(f64::NAN, 1.0).is_err());
        assert!(PriorParameters::new(f64::INFINITY, 1.0).is_err());
        assert!(PriorParameters::new(0.5, 0.5).is_ok());
    }

    #[test]
    fn test_threshold_ordering_enforced() {
        let err = Thresholds::new(0.6, 0.4, 0.8).unwrap_err();
        match err {
            ConfigError::ValidationFailed { field, .. } => {
                assert_eq!(field, "thresholds.familiar")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Equal thresholds are allowed; Familiar simply becomes unreachable.
        assert!(Thresholds::new(0.5, 0.5, 0.8).is_ok());
    }

    #[test]
    fn test_confidence_is_open_interval() {
        assert!(Thresholds::new(0.3, 0.5, 0.0).is_err());
        assert!(Thresholds::new(0.3, 0.5, 1.0).is_err());
        assert!(Thresholds::new(0.3, 0.5, f64::NAN).is_err());
        assert!(Thresholds::new(0.3, 0.5, 0.999).is_ok());
    }

    #[test]
    fn test_solver_budget() {
        assert!(SolverSettings::new(1e-10, 0).is_err());
        assert!(SolverSettings::new(0.0, 10).is_err());
        assert!(SolverSettings::new(1e-8, 50).is_ok());
    }
}
