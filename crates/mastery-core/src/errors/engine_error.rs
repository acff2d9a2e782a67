//! Posterior engine errors.

use super::error_code::{self, MasteryErrorCode};

/// Errors raised by the posterior engine for a single evaluation.
///
/// Bad input and solver instability are separate variants so a caller can
/// retry the latter with a relaxed tolerance instead of dropping the record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: &'static str, message: String },

    #[error(
        "Quantile solver did not converge for Beta({alpha}, {beta}) at p={probability} \
         after {iterations} iterations"
    )]
    NonConvergence {
        alpha: f64,
        beta: f64,
        probability: f64,
        iterations: u32,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// True for the invalid-input variant.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// True for the numerical-computation variant.
    pub fn is_numerical(&self) -> bool {
        matches!(self, Self::NonConvergence { .. })
    }
}

impl MasteryErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => error_code::INVALID_INPUT,
            Self::NonConvergence { .. } => error_code::NUMERICAL_ERROR,
        }
    }
}
