//! Iterative adjustment of finished parameter sets.

use std::fmt;
use std::str::FromStr;

use snowtune_params::{Builder, Parameters};
use tracing::debug;

use crate::cutoff::safety_cutoff;
use crate::error::EngineError;

const TUNING_EPSILON: f64 = 1e-9;
const MAX_TUNING_STEPS: usize = 10;
const MAX_TUNED_REPOLLS: usize = 20;

/// Which fields [`tune_safety_cutoff`] may raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TuneStrategy {
    /// Two more rounds per step.
    Beta,
    /// One more confidence vote per step, staying below `k - 1`.
    Confidence,
    /// One more round per step, one more confidence vote every other step.
    Both,
}

impl fmt::Display for TuneStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuneStrategy::Beta => write!(f, "beta"),
            TuneStrategy::Confidence => write!(f, "confidence"),
            TuneStrategy::Both => write!(f, "both"),
        }
    }
}

impl FromStr for TuneStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beta" => Ok(TuneStrategy::Beta),
            "confidence" => Ok(TuneStrategy::Confidence),
            "both" => Ok(TuneStrategy::Both),
            other => Err(EngineError::InvalidOptions(format!(
                "unknown tuning strategy `{other}` (expected beta, confidence, or both)"
            ))),
        }
    }
}

/// Raises `beta` and/or `alpha_confidence` until the safety cutoff at
/// epsilon 1e-9 reaches `target_percent`, for at most ten steps.
///
/// The pipeline depth follows `beta`, capped at 20. The result may still fall
/// short of the target when the step budget runs out.
pub fn tune_safety_cutoff(params: &Parameters, target_percent: f64, strategy: TuneStrategy) -> Parameters {
    let mut p = *params;
    let mut step = 0;
    while safety_cutoff(&p, TUNING_EPSILON) < target_percent && step < MAX_TUNING_STEPS {
        step += 1;
        match strategy {
            TuneStrategy::Beta => p.beta += 2,
            TuneStrategy::Confidence => {
                if p.alpha_confidence + 1 < p.k {
                    p.alpha_confidence += 1;
                }
            }
            TuneStrategy::Both => {
                p.beta += 1;
                if p.alpha_confidence + 1 < p.k && step % 2 == 0 {
                    p.alpha_confidence += 1;
                }
            }
        }
        p.concurrent_repolls = p.beta.min(MAX_TUNED_REPOLLS);
        debug!(step, beta = p.beta, alpha_confidence = p.alpha_confidence, "tuning step");
    }
    p
}

/// Sets the confidence quorum so that `percent` of the sample may be Byzantine.
pub fn tune_byzantine_tolerance(params: &Parameters, percent: f64) -> Parameters {
    *Builder::from_parameters(*params)
        .with_byzantine_tolerance(percent)
        .parameters()
}
