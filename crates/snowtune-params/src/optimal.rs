//! Closed-form parameter derivation from a description of the network.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ParamsError;
use crate::parameters::Parameters;

/// What the operator knows about the validator network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkCharacteristics {
    pub total_nodes: usize,
    /// Fraction of nodes expected to be faulty, in `[0, 1)`.
    pub expected_failure_rate: f64,
    pub network_latency_ms: u64,
    pub target_finality_ms: u64,
    pub target_throughput_tps: u64,
    pub is_production: bool,
}

impl Default for NetworkCharacteristics {
    fn default() -> Self {
        Self {
            total_nodes: 21,
            expected_failure_rate: 0.2,
            network_latency_ms: 50,
            target_finality_ms: 1_000,
            target_throughput_tps: 100,
            is_production: true,
        }
    }
}

/// Derived parameters together with one line of reasoning per step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalParameters {
    pub parameters: Parameters,
    pub reasoning: Vec<String>,
}

/// Derives a full parameter set from network characteristics.
///
/// Small networks (up to 30 nodes) are sampled in full; larger ones use
/// `min(50, 2 * floor(sqrt(n)))`. Quorums follow the expected failure rate,
/// `beta` follows the finality budget, and processing limits follow the
/// throughput target.
pub fn calculate_optimal_parameters(
    nc: &NetworkCharacteristics,
) -> Result<OptimalParameters, ParamsError> {
    if nc.total_nodes == 0 {
        return Err(ParamsError::invalid("totalNodes", "must be positive", 0));
    }
    if !(0.0..1.0).contains(&nc.expected_failure_rate) {
        return Err(ParamsError::invalid(
            "expectedFailureRate",
            "must be in [0, 1)",
            nc.expected_failure_rate,
        ));
    }

    let mut reasoning = Vec::with_capacity(6);

    let k = if nc.total_nodes <= 30 {
        reasoning.push(format!("K={}: sampling all nodes of a small network", nc.total_nodes));
        nc.total_nodes
    } else {
        let k = ((nc.total_nodes as f64).sqrt() as usize * 2).min(50);
        reasoning.push(format!("K={k}: 2 x sqrt(n) sampling for {} nodes", nc.total_nodes));
        k
    };

    let majority = k / 2 + 1;
    let alpha_preference = ((k as f64 * (1.0 - nc.expected_failure_rate)) as usize).max(majority);
    reasoning.push(format!(
        "AlphaPreference={alpha_preference}: tolerates {:.0}% failures",
        nc.expected_failure_rate * 100.0
    ));

    let (alpha_confidence, purpose) = if nc.is_production {
        let floor = (k as f64 * 0.82) as usize;
        let alpha = if floor < alpha_preference { alpha_preference + 1 } else { floor };
        (alpha.min(k), "production")
    } else {
        let floor = (k as f64 * 0.75) as usize;
        (floor.max(alpha_preference).min(k), "testing")
    };
    reasoning.push(format!(
        "AlphaConfidence={alpha_confidence}: {:.0}% supermajority for {purpose}",
        alpha_confidence as f64 / k as f64 * 100.0
    ));

    let rounds = nc
        .target_finality_ms
        .checked_div(nc.network_latency_ms)
        .map_or(0, |r| usize::try_from(r).unwrap_or(usize::MAX));
    let min_beta = if nc.is_production { 8 } else { 4 };
    let mut beta = rounds.max(min_beta);
    if (alpha_confidence as f64 / k as f64) < 0.75 {
        beta = (beta as f64 * 1.5) as usize;
    }
    reasoning.push(format!(
        "Beta={beta}: target finality {}ms with {}ms latency",
        nc.target_finality_ms, nc.network_latency_ms
    ));

    let concurrent_repolls = beta.min(20);
    reasoning.push(format!("ConcurrentRepolls={concurrent_repolls}: maximum pipelining"));

    let optimal_processing = match nc.target_throughput_tps {
        t if t > 1000 => 32,
        t if t > 100 => 20,
        _ => 10,
    };

    let mut params = Parameters {
        k,
        alpha_preference,
        alpha_confidence,
        beta,
        concurrent_repolls,
        optimal_processing,
        max_outstanding_items: (optimal_processing * 20).max(256),
        max_item_processing_time: Duration::from_secs(5),
    };
    let finality = params.expected_finality(nc.network_latency_ms);
    params.max_item_processing_time = finality.saturating_mul(10).max(Duration::from_secs(5));
    reasoning.push(format!(
        "Timeout={:?}: 10x expected finality",
        params.max_item_processing_time
    ));

    params.validate()?;
    info!(
        total_nodes = nc.total_nodes,
        k = params.k,
        beta = params.beta,
        "calculated optimal parameters"
    );
    Ok(OptimalParameters {
        parameters: params,
        reasoning,
    })
}
