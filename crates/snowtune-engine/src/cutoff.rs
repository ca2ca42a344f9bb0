//! Maximum tolerable adversarial stake for a target safety epsilon.

use snowtune_params::Parameters;
use tracing::debug;

use crate::error::EngineError;
use crate::probability::per_block_failure;

/// Bisection steps; enough to exhaust `f64` resolution on `[0, 1]`.
const SEARCH_ITERATIONS: usize = 60;

/// Largest adversarial stake, in percent, whose per-block safety failure
/// probability stays at or below `epsilon`.
///
/// The lower end of the final bracket is returned, so the result is always
/// on the safe side of the boundary.
pub fn find_safety_cutoff(params: &Parameters, epsilon: f64) -> Result<f64, EngineError> {
    if !(epsilon > 0.0 && epsilon < 1.0) {
        return Err(EngineError::InvalidEpsilon(epsilon));
    }
    Ok(safety_cutoff(params, epsilon))
}

pub(crate) fn safety_cutoff(params: &Parameters, epsilon: f64) -> f64 {
    let (mut low, mut high) = (0.0f64, 1.0f64);
    for _ in 0..SEARCH_ITERATIONS {
        let mid = (low + high) / 2.0;
        if per_block_failure(params, mid) > epsilon {
            high = mid;
        } else {
            low = mid;
        }
    }
    debug!(epsilon, cutoff = low, "safety cutoff converged");
    low * 100.0
}
