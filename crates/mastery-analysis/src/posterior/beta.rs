//! Conjugate Beta-Binomial update.
//!
//! Prior: Beta(alpha, beta).
//! Posterior: Beta(alpha + k, beta + n - k) where k = successes, n = attempts.

use mastery_core::errors::EngineError;

/// Posterior Beta parameters and mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaPosterior {
    pub alpha: f64,
    pub beta: f64,
    /// alpha / (alpha + beta).
    pub mean: f64,
}

impl BetaPosterior {
    /// Posterior variance: alpha*beta / ((alpha+beta)^2 * (alpha+beta+1)).
    pub fn variance(&self) -> f64 {
        let sum = self.alpha + self.beta;
        (self.alpha * self.beta) / (sum * sum * (sum + 1.0))
    }

    /// Total pseudo-count, `alpha + beta`.
    pub fn concentration(&self) -> f64 {
        self.alpha + self.beta
    }
}

/// Update a Beta prior with `successes` out of `attempts`.
///
/// Zero attempts returns the prior unchanged.
pub fn compute_posterior(
    prior_alpha: f64,
    prior_beta: f64,
    attempts: u64,
    successes: u64,
) -> Result<BetaPosterior, EngineError> {
    check_shape("prior_alpha", prior_alpha)?;
    check_shape("prior_beta", prior_beta)?;
    if successes > attempts {
        return Err(EngineError::invalid(
            "successes",
            format!("successes ({successes}) exceeds attempts ({attempts})"),
        ));
    }

    let alpha = prior_alpha + successes as f64;
    let beta = prior_beta + (attempts - successes) as f64;
    Ok(BetaPosterior {
        alpha,
        beta,
        mean: alpha / (alpha + beta),
    })
}

/// Beta shape parameters must be positive and finite.
pub(crate) fn check_shape(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(
            field,
            format!("must be a positive finite number, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_observations_keep_prior() {
        let post = compute_posterior(2.0, 2.0, 0, 0).unwrap();
        assert_eq!(post.alpha, 2.0);
        assert_eq!(post.beta, 2.0);
        assert!((post.mean - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_posterior_with_evidence() {
        let post = compute_posterior(2.0, 2.0, 10, 7).unwrap();
        assert_eq!(post.alpha, 9.0);
        assert_eq!(post.beta, 5.0);
        assert!((post.mean - 9.0 / 14.0).abs() < 1e-15);
    }

    #[test]
    fn test_all_successes() {
        let post = compute_posterior(1.0, 1.0, 100, 100).unwrap();
        assert_eq!(post.alpha, 101.0);
        assert_eq!(post.beta, 1.0);
        assert!(post.mean > 0.98 && post.mean < 1.0);
    }

    #[test]
    fn test_successes_exceed_attempts() {
        let err = compute_posterior(2.0, 2.0, 5, 7).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { field: "successes", .. }));
    }

    #[test]
    fn test_non_positive_prior() {
        assert!(compute_posterior(0.0, 2.0, 1, 1).unwrap_err().is_invalid_input());
        assert!(compute_posterior(2.0, -1.0, 1, 1).unwrap_err().is_invalid_input());
        assert!(compute_posterior(f64::NAN, 2.0, 1, 1).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_variance_shrinks_with_evidence() {
        let small = compute_posterior(2.0, 2.0, 4, 2).unwrap();
        let large = compute_posterior(2.0, 2.0, 400, 200).unwrap();
        assert!(large.variance() < small.variance());
        assert_eq!(large.concentration(), 404.0);
    }
}
