//! Central credible intervals.

use mastery_core::errors::EngineError;
use mastery_core::types::SolverSettings;

use super::quantile::beta_quantile;

/// Central credible interval of Beta(`alpha`, `beta`) holding `confidence` mass,
/// solved with the default solver budget.
pub fn credible_interval(alpha: f64, beta: f64, confidence: f64) -> Result<(f64, f64), EngineError> {
    credible_interval_with(alpha, beta, confidence, &SolverSettings::default())
}

/// Central credible interval with an explicit solver budget.
///
/// The bounds are the quantiles at `(1 - confidence) / 2` and
/// `1 - (1 - confidence) / 2`, so `0 <= low <= high <= 1`.
pub fn credible_interval_with(
    alpha: f64,
    beta: f64,
    confidence: f64,
    solver: &SolverSettings,
) -> Result<(f64, f64), EngineError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(EngineError::invalid(
            "confidence",
            format!("must be strictly between 0.0 and 1.0, got {confidence}"),
        ));
    }

    let tail = (1.0 - confidence) / 2.0;
    let low = beta_quantile(alpha, beta, tail, solver)?;
    let high = beta_quantile(alpha, beta, 1.0 - tail, solver)?;

    // Both bounds carry solver error; near-zero confidence can leave them a
    // hair out of order.
    Ok((low.min(high), high.max(low)))
}
