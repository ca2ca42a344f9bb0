//! Safety and liveness failure probabilities under a binomial sampling model.
//!
//! Each sampled validator is independently adversarial with probability equal
//! to the adversarial stake ratio. Rounds are treated as independent, so the
//! chance of `beta` consecutive bad rounds is the per-round chance raised to
//! `beta`.

use serde::Serialize;
use snowtune_params::Parameters;
use snowtune_prob::{binomial_cdf, binomial_tail};

use crate::error::EngineError;

/// Failure probabilities for one adversarial stake ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityAnalysis {
    pub adversarial_ratio: f64,
    /// Probability that `beta` consecutive rounds reach the confidence quorum adversarially.
    pub safety_failure_probability: f64,
    /// Probability that honest samples miss the preference quorum in a round.
    pub liveness_failure_probability: f64,
    /// Mean rounds until finalization; `+inf` when a successful round is impossible.
    ///
    /// Serialized as `null` when infinite.
    pub expected_rounds_to_finality: f64,
    pub probability_of_disagreement: f64,
}

/// Analyzes `params` against an adversary holding `adversarial_ratio` of the stake.
pub fn analyze_probabilities(
    params: &Parameters,
    adversarial_ratio: f64,
) -> Result<ProbabilityAnalysis, EngineError> {
    if !(0.0..=1.0).contains(&adversarial_ratio) {
        return Err(EngineError::InvalidRatio(adversarial_ratio));
    }

    let safety = per_block_failure(params, adversarial_ratio);
    Ok(ProbabilityAnalysis {
        adversarial_ratio,
        safety_failure_probability: safety,
        liveness_failure_probability: liveness_failure(params, adversarial_ratio),
        expected_rounds_to_finality: expected_rounds(params, adversarial_ratio),
        probability_of_disagreement: 2.0 * safety,
    })
}

/// P[X >= alpha_confidence] for X ~ Binomial(k, ratio).
pub(crate) fn per_round_failure(params: &Parameters, ratio: f64) -> f64 {
    binomial_tail(params.k as u64, params.alpha_confidence as u64, ratio)
}

/// Per-round failure raised to `beta`.
pub(crate) fn per_block_failure(params: &Parameters, ratio: f64) -> f64 {
    raise(per_round_failure(params, ratio), params.beta)
}

/// 1 - P[honest >= alpha_preference], with honest ~ Binomial(k, 1 - ratio).
fn liveness_failure(params: &Parameters, ratio: f64) -> f64 {
    match params.alpha_preference.checked_sub(1) {
        Some(max_short) => binomial_cdf(params.k as u64, max_short as u64, 1.0 - ratio),
        None => 0.0,
    }
}

/// `beta / P[adversarial <= k - alpha_confidence]`.
fn expected_rounds(params: &Parameters, ratio: f64) -> f64 {
    let success = match params.k.checked_sub(params.alpha_confidence) {
        Some(slack) => binomial_cdf(params.k as u64, slack as u64, ratio),
        None => 0.0,
    };
    if success > 0.0 {
        params.beta as f64 / success
    } else {
        f64::INFINITY
    }
}

fn raise(base: f64, exp: usize) -> f64 {
    match i32::try_from(exp) {
        Ok(e) => base.powi(e),
        Err(_) => base.powf(exp as f64),
    }
}
