//! Bayesian posterior engine.
//!
//! Beta(alpha, beta) prior, Binomial likelihood, Beta posterior.
//! Classification uses only the lower bound of the central credible
//! interval; the posterior mean is reported but never decides a tier.

pub mod beta;
pub mod categorize;
mod incomplete_beta;
pub mod interval;
pub mod quantile;
pub mod types;

pub use beta::{compute_posterior, BetaPosterior};
pub use categorize::categorize;
pub use interval::{credible_interval, credible_interval_with};
pub use quantile::beta_quantile;
pub use types::PosteriorResult;

use mastery_core::errors::EngineError;
use mastery_core::types::{PriorParameters, SolverSettings, Thresholds};

/// Run the full per-record pipeline: update, interval, categorize.
pub fn evaluate(
    prior: &PriorParameters,
    attempts: u64,
    successes: u64,
    thresholds: &Thresholds,
    solver: &SolverSettings,
) -> Result<PosteriorResult, EngineError> {
    let posterior = compute_posterior(prior.alpha, prior.beta, attempts, successes)?;
    let (ci_low, ci_high) =
        credible_interval_with(posterior.alpha, posterior.beta, thresholds.confidence, solver)?;
    Ok(PosteriorResult {
        post_alpha: posterior.alpha,
        post_beta: posterior.beta,
        post_mean: posterior.mean,
        ci_low,
        ci_high,
        label: categorize(ci_low, thresholds),
    })
}
