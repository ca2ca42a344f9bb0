//! Fluent construction of [`Parameters`] from high-level intents.
//!
//! Every method takes the builder by value and hands it back, so calls chain.
//! Intermediate states may break the invariants; only [`Builder::build`]
//! clamps and validates.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ParamsError;
use crate::parameters::Parameters;
use crate::presets;

/// Networks up to this size are sampled in full.
const FULL_SAMPLE_LIMIT: usize = 30;
/// Upper bound on the sample size derived from a node count.
const MAX_DERIVED_K: usize = 50;
/// Round latency assumed when sizing the pipeline for a node count.
const ASSUMED_LATENCY: Duration = Duration::from_millis(50);
/// Finality budget assumed when sizing the pipeline for a node count.
const ASSUMED_FINALITY_TARGET: Duration = Duration::from_secs(10);
/// Lower bound on `beta` when derived from a finality target.
const MIN_TARGET_BETA: usize = 5;
/// Upper bound on pipeline depth when derived from a finality target.
const MAX_TARGET_REPOLLS: usize = 20;

/// Optimization objective layered on top of a base parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Objective {
    Latency,
    Security,
    Throughput,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Latency => write!(f, "latency"),
            Objective::Security => write!(f, "security"),
            Objective::Throughput => write!(f, "throughput"),
        }
    }
}

impl FromStr for Objective {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latency" => Ok(Objective::Latency),
            "security" => Ok(Objective::Security),
            "throughput" => Ok(Objective::Throughput),
            _ => Err(ParamsError::UnknownObjective(s.to_string())),
        }
    }
}

/// Incremental parameter builder.
#[derive(Debug, Clone)]
pub struct Builder {
    params: Parameters,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            params: Parameters {
                k: 11,
                alpha_preference: 8,
                alpha_confidence: 9,
                beta: 10,
                concurrent_repolls: 10,
                optimal_processing: 10,
                max_outstanding_items: 256,
                max_item_processing_time: Duration::from_secs(10),
            },
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing parameter set.
    pub fn from_parameters(params: Parameters) -> Self {
        Self { params }
    }

    /// Replaces every field with the named preset.
    pub fn from_preset(self, name: &str) -> Result<Self, ParamsError> {
        let params = presets::preset(name)?;
        debug!(preset = name, "loaded preset");
        Ok(Self { params })
    }

    /// Derives sample size, quorums, and `beta` for a network of `node_count` validators.
    ///
    /// Networks above 30 nodes are under-sampled: `k = min(50, 20 + (n - 30) / 10)`.
    /// A zero node count leaves the builder unchanged.
    pub fn for_node_count(mut self, node_count: usize) -> Self {
        if node_count == 0 {
            warn!("ignoring node count of zero");
            return self;
        }

        let p = &mut self.params;
        p.k = if node_count <= FULL_SAMPLE_LIMIT {
            node_count
        } else {
            (20 + (node_count - FULL_SAMPLE_LIMIT) / 10).min(MAX_DERIVED_K)
        };
        p.alpha_preference = p.k * 2 / 3 + 1;
        p.alpha_confidence = p.k * 3 / 4 + 1;
        p.beta = match node_count {
            0..=5 => 11,
            6..=11 => 20,
            12..=21 => 31,
            _ => 40,
        };

        let total = ASSUMED_LATENCY.saturating_mul(u32::try_from(p.beta).unwrap_or(u32::MAX));
        if total > ASSUMED_FINALITY_TARGET {
            let depth = (p.beta as f64 * ASSUMED_LATENCY.as_secs_f64()
                / ASSUMED_FINALITY_TARGET.as_secs_f64()) as usize;
            p.concurrent_repolls = depth.max(4).min(p.beta);
        }

        debug!(
            node_count,
            k = p.k,
            alpha_preference = p.alpha_preference,
            alpha_confidence = p.alpha_confidence,
            beta = p.beta,
            "derived parameters for node count"
        );
        self
    }

    pub fn with_sample_size(mut self, k: usize) -> Self {
        self.params.k = k;
        self
    }

    pub fn with_quorums(mut self, alpha_preference: usize, alpha_confidence: usize) -> Self {
        self.params.alpha_preference = alpha_preference;
        self.params.alpha_confidence = alpha_confidence;
        self
    }

    /// Sets both quorums as percentages of the current `k`, floored and kept at least 1.
    pub fn with_quorum_percentages(mut self, preference_pct: f64, confidence_pct: f64) -> Self {
        let k = self.params.k as f64;
        self.params.alpha_preference = ((k * preference_pct / 100.0) as usize).max(1);
        self.params.alpha_confidence = ((k * confidence_pct / 100.0) as usize).max(1);
        self
    }

    pub fn with_beta(mut self, beta: usize) -> Self {
        self.params.beta = beta;
        self
    }

    pub fn with_concurrent_repolls(mut self, repolls: usize) -> Self {
        self.params.concurrent_repolls = repolls;
        self
    }

    pub fn with_optimal_processing(mut self, optimal: usize) -> Self {
        self.params.optimal_processing = optimal;
        self
    }

    pub fn with_max_outstanding_items(mut self, max: usize) -> Self {
        self.params.max_outstanding_items = max;
        self
    }

    pub fn with_max_item_processing_time(mut self, timeout: Duration) -> Self {
        self.params.max_item_processing_time = timeout;
        self
    }

    /// Fits `beta` into `target` at the given round latency, then pipelines it.
    ///
    /// `beta = max(5, target / latency)` and `concurrent_repolls = min(beta, 20)`.
    /// A zero latency leaves the builder unchanged.
    pub fn with_target_finality(mut self, target: Duration, network_latency_ms: u64) -> Self {
        if network_latency_ms == 0 {
            warn!("ignoring finality target with zero network latency");
            return self;
        }
        let round_time = Duration::from_millis(network_latency_ms).as_nanos();
        let rounds = usize::try_from(target.as_nanos() / round_time).unwrap_or(usize::MAX);

        self.params.beta = rounds.max(MIN_TARGET_BETA);
        self.params.concurrent_repolls = self.params.beta.min(MAX_TARGET_REPOLLS);
        debug!(
            target_ms = target.as_millis() as u64,
            network_latency_ms,
            beta = self.params.beta,
            "fitted beta to finality target"
        );
        self
    }

    /// Sets `alpha_confidence` so that `percent` of the sample may be Byzantine.
    ///
    /// The confidence quorum never drops to a simple majority or below; the
    /// preference quorum is pulled under it when necessary.
    pub fn with_byzantine_tolerance(mut self, percent: f64) -> Self {
        let p = &mut self.params;
        let majority = p.k / 2 + 1;
        let max_byzantine = (p.k as f64 * percent / 100.0) as usize;

        let mut required = p.k.saturating_sub(max_byzantine);
        if required < majority {
            warn!(percent, k = p.k, "tolerance would break the majority requirement");
            required = majority;
        }
        p.alpha_confidence = required;

        if p.alpha_preference > p.alpha_confidence {
            p.alpha_preference = (p.alpha_confidence - 1).max(majority);
        }
        self
    }

    /// Shortens finality: `beta` capped at 8 and fully pipelined.
    pub fn optimize_for_latency(mut self) -> Self {
        let p = &mut self.params;
        p.beta = p.beta.min(8);
        p.concurrent_repolls = p.beta;
        p.optimal_processing = 20;
        p.max_outstanding_items = 512;
        self
    }

    /// Raises both quorums above 75% / 80% and `beta` to at least 20.
    pub fn optimize_for_security(mut self) -> Self {
        let p = &mut self.params;
        p.alpha_preference = p.k * 3 / 4 + 1;
        p.alpha_confidence = p.k * 4 / 5 + 1;
        p.beta = p.beta.max(20);
        p.max_outstanding_items = 128;
        self
    }

    pub fn optimize_for_throughput(mut self) -> Self {
        let p = &mut self.params;
        p.concurrent_repolls = p.beta;
        p.optimal_processing = 32;
        p.max_outstanding_items = 1024;
        p.max_item_processing_time = Duration::from_secs(5);
        self
    }

    pub fn optimize_for(self, objective: Objective) -> Self {
        debug!(%objective, "applying objective");
        match objective {
            Objective::Latency => self.optimize_for_latency(),
            Objective::Security => self.optimize_for_security(),
            Objective::Throughput => self.optimize_for_throughput(),
        }
    }

    /// Current, unvalidated state.
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Clamps the quorums into `k`, lifts `alpha_confidence` to `alpha_preference`,
    /// and validates.
    pub fn build(self) -> Result<Parameters, ParamsError> {
        let mut p = self.params;
        p.alpha_preference = p.alpha_preference.min(p.k);
        p.alpha_confidence = p.alpha_confidence.min(p.k);
        if p.alpha_confidence < p.alpha_preference {
            p.alpha_confidence = p.alpha_preference;
        }
        p.validate()?;
        Ok(p)
    }
}
