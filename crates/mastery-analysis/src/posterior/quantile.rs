//! Beta quantile function by inverting the regularized incomplete Beta function.
//!
//! Finds x with I_x(a, b) = p using Newton steps on the density, falling
//! back to bisection whenever a step leaves the current bracket or fails to
//! halve the previous step. Bisection is geometric while the bracket spans
//! more than a factor of four, so quantiles far below 1e-12 are reached in
//! a few dozen steps and come back with full relative precision.

use mastery_core::errors::EngineError;
use mastery_core::types::SolverSettings;

use super::beta::check_shape;
use super::incomplete_beta;

/// Quantile of Beta(`alpha`, `beta`) at cumulative probability `p`.
///
/// `p = 0` and `p = 1` map to the support bounds without iterating. A
/// quantile below the smallest normal `f64` is returned as `0.0`.
/// Returns [`EngineError::NonConvergence`] if the step or the bracket has
/// not shrunk below `solver.tolerance` relative to x within
/// `solver.max_iterations` steps, or if I_x(a, b) cannot be evaluated.
pub fn beta_quantile(
    alpha: f64,
    beta: f64,
    p: f64,
    solver: &SolverSettings,
) -> Result<f64, EngineError> {
    check_shape("alpha", alpha)?;
    check_shape("beta", beta)?;
    if !(0.0..=1.0).contains(&p) {
        return Err(EngineError::invalid(
            "probability",
            format!("must be between 0.0 and 1.0, got {p}"),
        ));
    }
    if p == 0.0 {
        return Ok(0.0);
    }
    if p == 1.0 {
        return Ok(1.0);
    }

    let residual = |x: f64, iteration: u32| -> Result<(f64, f64), EngineError> {
        match incomplete_beta::regularized(alpha, beta, x) {
            Some(cdf) => Ok((cdf - p, incomplete_beta::density(alpha, beta, x))),
            None => {
                tracing::warn!(alpha, beta, p, x, "incomplete beta could not be evaluated");
                Err(EngineError::NonConvergence {
                    alpha,
                    beta,
                    probability: p,
                    iterations: iteration,
                })
            }
        }
    };

    let mut lo = f64::MIN_POSITIVE;
    let mut hi = 1.0_f64;
    if residual(lo, 0)?.0 >= 0.0 {
        return Ok(0.0);
    }

    let mut x = (alpha / (alpha + beta)).clamp(lo, 1.0 - f64::EPSILON);
    let (mut f, mut df) = residual(x, 0)?;
    if f == 0.0 {
        return Ok(x);
    }
    shrink(&mut lo, &mut hi, x, f);

    let mut step = 1.0_f64;
    let mut prev_step = step;
    for iteration in 1..=solver.max_iterations {
        // x is always one end of the bracket here, so a usable Newton
        // candidate has to land strictly inside it.
        let newton = x - f / df;
        let newton_too_slow = (2.0 * f).abs() > (prev_step * df).abs();
        prev_step = step;

        let next = if df.is_finite() && df > 0.0 && lo < newton && newton < hi && !newton_too_slow
        {
            newton
        } else {
            bisect(lo, hi)
        };
        step = x - next;
        x = next;

        if step.abs() <= solver.tolerance * x || hi - lo <= solver.tolerance * hi {
            tracing::trace!(alpha, beta, p, x, iteration, "beta quantile converged");
            return Ok(x);
        }

        (f, df) = residual(x, iteration)?;
        if f == 0.0 {
            return Ok(x);
        }
        shrink(&mut lo, &mut hi, x, f);
    }

    tracing::warn!(alpha, beta, p, lo, hi, "beta quantile did not converge");
    Err(EngineError::NonConvergence {
        alpha,
        beta,
        probability: p,
        iterations: solver.max_iterations,
    })
}

/// The CDF is increasing, so the sign of the residual says which side the root is on.
fn shrink(lo: &mut f64, hi: &mut f64, x: f64, f: f64) {
    if f < 0.0 {
        *lo = x;
    } else {
        *hi = x;
    }
}

/// Geometric midpoint while the bracket spans orders of magnitude, arithmetic after.
fn bisect(lo: f64, hi: f64) -> f64 {
    if hi > 4.0 * lo {
        lo.sqrt() * hi.sqrt()
    } else {
        lo + 0.5 * (hi - lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solver() -> SolverSettings {
        SolverSettings::default()
    }

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual} (diff {})",
            (actual - expected).abs()
        );
    }

    #[test]
    fn test_symmetric_median() {
        assert_close(beta_quantile(2.0, 2.0, 0.5, &solver()).unwrap(), 0.5, 1e-10);
        assert_close(beta_quantile(7.5, 7.5, 0.5, &solver()).unwrap(), 0.5, 1e-10);
    }

    #[test]
    fn test_reference_quantiles() {
        // Integer shapes: I_x(a, b) equals a Binomial(a + b - 1, x) upper tail.
        assert_close(beta_quantile(9.0, 5.0, 0.1, &solver()).unwrap(), 0.476_571_223_504_831_3, 1e-9);
        assert_close(beta_quantile(9.0, 5.0, 0.9, &solver()).unwrap(), 0.799_497_960_590_092, 1e-9);
        assert_close(beta_quantile(2.0, 2.0, 0.1, &solver()).unwrap(), 0.195_800_105_659_091_7, 1e-9);
        assert_close(beta_quantile(2.0, 12.0, 0.1, &solver()).unwrap(), 0.041_691_043_978_416_46, 1e-9);
        assert_close(beta_quantile(12.0, 2.0, 0.1, &solver()).unwrap(), 0.732_164_292_029_676, 1e-9);
    }

    #[test]
    fn test_closed_form_families() {
        // Beta(1, 1) is uniform.
        assert_close(beta_quantile(1.0, 1.0, 0.37, &solver()).unwrap(), 0.37, 1e-10);
        // Beta(a, 1): x = p^(1/a).
        assert_close(beta_quantile(3.0, 1.0, 0.2, &solver()).unwrap(), 0.2_f64.powf(1.0 / 3.0), 1e-10);
        // Beta(1, b): x = 1 - (1 - p)^(1/b).
        assert_close(
            beta_quantile(1.0, 4.0, 0.6, &solver()).unwrap(),
            1.0 - 0.4_f64.powf(0.25),
            1e-10,
        );
        // Beta(1/2, 1/2) is the arcsine law: x = sin^2(pi p / 2).
        let expected = (std::f64::consts::PI * 0.1 / 2.0).sin().powi(2);
        assert_close(beta_quantile(0.5, 0.5, 0.1, &solver()).unwrap(), expected, 1e-10);
    }

    #[test]
    fn test_support_bounds() {
        assert_eq!(beta_quantile(2.0, 3.0, 0.0, &solver()).unwrap(), 0.0);
        assert_eq!(beta_quantile(2.0, 3.0, 1.0, &solver()).unwrap(), 1.0);
    }

    #[test]
    fn test_extreme_tails_converge() {
        for p in [1e-12, 5e-7, 1.0 - 5e-7] {
            let x = beta_quantile(2.0, 2.0, p, &solver()).unwrap();
            assert!(x.is_finite() && (0.0..=1.0).contains(&x), "p={p} gave {x}");
        }
        let lo = beta_quantile(2.0, 2.0, 5e-7, &solver()).unwrap();
        let hi = beta_quantile(2.0, 2.0, 1.0 - 5e-7, &solver()).unwrap();
        assert!(lo < hi);
    }

    #[test]
    fn test_large_counts_converge() {
        let x = beta_quantile(5_001.0, 4_001.0, 0.1, &solver()).unwrap();
        let mean = 5_001.0 / 9_002.0;
        assert!(x < mean && mean - x < 0.02, "got {x}");
    }

    #[test]
    fn test_hundred_million_attempts() {
        // Beta(2 + 5e7, 2 + 5e7): the central 80% interval straddles 0.5.
        let shape = 50_000_002.0;
        let low = beta_quantile(shape, shape, 0.1, &solver()).unwrap();
        let high = beta_quantile(shape, shape, 0.9, &solver()).unwrap();
        assert_close(low, 0.499_935_922_423_107_25, 1e-11);
        assert_close(high, 0.500_064_077_576_892_75, 1e-11);
    }

    #[test]
    fn test_billion_attempts() {
        assert_close(
            beta_quantile(500_000_002.0, 500_000_002.0, 0.1, &solver()).unwrap(),
            0.499_979_736_890_613_4,
            1e-10,
        );
        assert_close(
            beta_quantile(700_000_002.0, 300_000_002.0, 0.1, &solver()).unwrap(),
            0.699_981_427_667_822_2,
            1e-10,
        );
    }

    #[test]
    fn test_tiny_quantiles_keep_relative_precision() {
        // Beta(a, 1): x = p^(1/a), here 0.5^1000.
        let x = beta_quantile(0.001, 1.0, 0.5, &solver()).unwrap();
        let expected = 0.5_f64.powi(1000);
        assert!(((x - expected) / expected).abs() < 1e-9, "got {x:e}, want {expected:e}");

        let x = beta_quantile(0.01, 0.01, 0.1, &solver()).unwrap();
        let expected = 1.247_264_321_227_780_8e-70;
        assert!(((x - expected) / expected).abs() < 1e-9, "got {x:e}, want {expected:e}");
    }

    #[test]
    fn test_quantile_below_smallest_normal_is_zero() {
        // 0.1^1000 underflows f64.
        assert_eq!(beta_quantile(0.001, 1.0, 0.1, &solver()).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(beta_quantile(0.0, 1.0, 0.5, &solver()).unwrap_err().is_invalid_input());
        assert!(beta_quantile(1.0, 1.0, 1.5, &solver()).unwrap_err().is_invalid_input());
        assert!(beta_quantile(1.0, 1.0, f64::NAN, &solver()).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_exhausted_budget_is_numerical_error() {
        let starved = SolverSettings {
            tolerance: 1e-15,
            max_iterations: 1,
        };
        let err = beta_quantile(9.0, 5.0, 0.1, &starved).unwrap_err();
        assert!(err.is_numerical(), "unexpected error: {err:?}");
    }
}
