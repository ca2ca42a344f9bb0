//! Full analysis of a parameter set against a declared network.
//!
//! The checker is a pure function of the parameters, the network size, the
//! round latency, and a [`CheckerOptions`] value. It never rejects its input:
//! structural problems become warnings in the report.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use snowtune_params::Parameters;
use tracing::{debug, info};

use crate::cutoff::safety_cutoff;
use crate::error::EngineError;
use crate::probability::{per_block_failure, per_round_failure};

const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 3600.0;

/// Tunable inputs of the checker.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerOptions {
    /// Target per-block safety failure probability for the cutoff solver.
    pub epsilon: f64,
    /// Adversarial stakes, in percent, tabulated in the report.
    pub adversarial_stakes: Vec<f64>,
    pub txs_per_block: u64,
    /// Block rate assumed when converting expected blocks to years.
    pub blocks_per_second: f64,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            adversarial_stakes: vec![10.0, 20.0, 25.0, 30.0, 33.0, 40.0, 50.0],
            txs_per_block: 100,
            blocks_per_second: 1.0,
        }
    }
}

impl CheckerOptions {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.epsilon > 0.0 && self.epsilon < 1.0) {
            return Err(EngineError::InvalidEpsilon(self.epsilon));
        }
        if let Some(stake) = self
            .adversarial_stakes
            .iter()
            .find(|s| !(0.0..=100.0).contains(*s))
        {
            return Err(EngineError::InvalidOptions(format!(
                "adversarial stake {stake} is outside [0, 100]"
            )));
        }
        if !(self.blocks_per_second.is_finite() && self.blocks_per_second > 0.0) {
            return Err(EngineError::InvalidOptions(format!(
                "block rate {} must be positive",
                self.blocks_per_second
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencyAnalysis {
    /// One round, the floor under perfect pipelining.
    #[serde(serialize_with = "snowtune_params::duration_nanos::serialize")]
    pub theoretical_minimum: Duration,
    #[serde(serialize_with = "snowtune_params::duration_nanos::serialize")]
    pub expected_finality: Duration,
    /// Two round times per confirmation round without pipelining.
    #[serde(serialize_with = "snowtune_params::duration_nanos::serialize")]
    pub worst_case_finality: Duration,
    #[serde(serialize_with = "snowtune_params::duration_nanos::serialize")]
    pub round_time: Duration,
    /// `min(concurrent_repolls, beta) / beta`.
    pub pipeline_efficiency: f64,
}

/// Failure rates at one adversarial stake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureProb {
    /// Stake in percent.
    pub adversarial_stake: f64,
    pub per_round_failure: f64,
    pub per_block_failure: f64,
    /// `1 / per_block_failure`; infinite (serialized as `null`) when failure is impossible.
    pub expected_blocks_to_fail: f64,
    pub years_to_failure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivenessAnalysis {
    pub min_honest_nodes_for_progress: usize,
    pub max_tolerable_crashes: usize,
    pub crash_tolerance_percent: f64,
    /// Share of the whole network that can be unreachable; negative when the
    /// network is smaller than the preference quorum.
    pub partition_tolerance_percent: f64,
}

/// Dominant limit on throughput.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bottleneck {
    #[serde(rename = "Pipeline depth")]
    PipelineDepth,
    #[serde(rename = "Outstanding item limit")]
    OutstandingItemLimit,
    #[serde(rename = "Network latency")]
    NetworkLatency,
}

impl fmt::Display for Bottleneck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bottleneck::PipelineDepth => write!(f, "Pipeline depth"),
            Bottleneck::OutstandingItemLimit => write!(f, "Outstanding item limit"),
            Bottleneck::NetworkLatency => write!(f, "Network latency"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputAnalysis {
    pub max_transactions_per_second: u64,
    /// `1 / expected_finality`; infinite when finality is instantaneous.
    pub max_blocks_per_second: f64,
    pub pipeline_utilization: f64,
    pub processing_bottleneck: Bottleneck,
}

/// Everything the checker derives for one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckerReport {
    pub parameters: Parameters,
    pub total_nodes: usize,
    pub network_latency_ms: u64,
    pub warnings: Vec<String>,
    pub latency_analysis: LatencyAnalysis,
    pub failure_probabilities: Vec<FailureProb>,
    /// Largest tolerable adversarial stake, in percent.
    pub safety_cutoff: f64,
    pub epsilon: f64,
    pub liveness_analysis: LivenessAnalysis,
    pub throughput_analysis: ThroughputAnalysis,
    pub recommendations: Vec<String>,
}

/// Runs the checker with [`CheckerOptions::default`].
pub fn run_checker(params: &Parameters, total_nodes: usize, network_latency_ms: u64) -> CheckerReport {
    build_report(params, total_nodes, network_latency_ms, &CheckerOptions::default())
}

/// Runs the checker with custom options.
pub fn run_checker_with(
    params: &Parameters,
    total_nodes: usize,
    network_latency_ms: u64,
    options: &CheckerOptions,
) -> Result<CheckerReport, EngineError> {
    options.validate()?;
    Ok(build_report(params, total_nodes, network_latency_ms, options))
}

fn build_report(
    params: &Parameters,
    total_nodes: usize,
    network_latency_ms: u64,
    options: &CheckerOptions,
) -> CheckerReport {
    let warnings = structural_warnings(params, total_nodes);
    debug!(count = warnings.len(), "structural checks done");

    let latency_analysis = analyze_latency(params, network_latency_ms);
    debug!(
        expected_ms = latency_analysis.expected_finality.as_millis() as u64,
        "latency analysis done"
    );

    let failure_probabilities: Vec<FailureProb> = options
        .adversarial_stakes
        .iter()
        .map(|&stake| failure_at(params, stake, options.blocks_per_second))
        .collect();

    let safety_cutoff = safety_cutoff(params, options.epsilon);
    let liveness_analysis = analyze_liveness(params, total_nodes);
    let throughput_analysis = analyze_throughput(params, &latency_analysis, options.txs_per_block);

    let mut report = CheckerReport {
        parameters: *params,
        total_nodes,
        network_latency_ms,
        warnings,
        latency_analysis,
        failure_probabilities,
        safety_cutoff,
        epsilon: options.epsilon,
        liveness_analysis,
        throughput_analysis,
        recommendations: Vec::new(),
    };
    report.recommendations = recommendations(&report);

    info!(
        k = params.k,
        total_nodes,
        safety_cutoff = report.safety_cutoff,
        warnings = report.warnings.len(),
        recommendations = report.recommendations.len(),
        "checker report ready"
    );
    report
}

fn structural_warnings(p: &Parameters, total_nodes: usize) -> Vec<String> {
    let mut warnings = Vec::new();

    if p.k < 3 {
        warnings.push("CRITICAL: K < 3 - insufficient sample size for consensus".to_string());
    }
    if p.alpha_preference <= p.k / 2 {
        warnings.push(format!(
            "CRITICAL: AlphaPreference ({}) <= 50% of K ({}) - violates liveness requirement",
            p.alpha_preference, p.k
        ));
    }
    if p.alpha_confidence < p.alpha_preference {
        warnings.push(format!(
            "CRITICAL: AlphaConfidence ({}) < AlphaPreference ({}) - invalid configuration",
            p.alpha_confidence, p.alpha_preference
        ));
    }
    if p.beta < 1 {
        warnings.push("CRITICAL: Beta < 1 - no rounds to achieve finality".to_string());
    }
    if p.concurrent_repolls < p.beta {
        warnings.push(format!(
            "PERFORMANCE: ConcurrentRepolls ({}) < Beta ({}) - suboptimal pipelining",
            p.concurrent_repolls, p.beta
        ));
    }

    if p.k > 0 {
        let ratio = p.alpha_confidence as f64 / p.k as f64;
        if ratio > 0.9 {
            warnings.push(format!(
                "LIVENESS: High confidence quorum {:.0}% may hurt liveness under failures",
                ratio * 100.0
            ));
        } else if ratio < 0.67 {
            warnings.push(format!(
                "SAFETY: Low confidence quorum {:.0}% (< 67%) risks Byzantine agreement safety",
                ratio * 100.0
            ));
        }
    }

    if total_nodes == 0 {
        warnings.push("INVALID: total node count is zero".to_string());
    } else if p.k > total_nodes {
        warnings.push(format!("INVALID: K ({}) > total nodes ({total_nodes})", p.k));
    } else if total_nodes <= 30 && (p.k as f64 / total_nodes as f64) < 0.5 {
        warnings.push(format!(
            "SUBOPTIMAL: Only sampling {}/{total_nodes} ({:.0}%) nodes in small network",
            p.k,
            p.k as f64 / total_nodes as f64 * 100.0
        ));
    }

    warnings
}

fn analyze_latency(p: &Parameters, network_latency_ms: u64) -> LatencyAnalysis {
    let round_time = Duration::from_millis(network_latency_ms);
    let rounds = u32::try_from(p.beta).unwrap_or(u32::MAX);
    let pipeline_efficiency = if p.beta == 0 {
        0.0
    } else {
        p.concurrent_repolls.min(p.beta) as f64 / p.beta as f64
    };

    LatencyAnalysis {
        theoretical_minimum: round_time,
        expected_finality: p.expected_finality(network_latency_ms),
        worst_case_finality: round_time.saturating_mul(rounds).saturating_mul(2),
        round_time,
        pipeline_efficiency,
    }
}

fn failure_at(p: &Parameters, stake_percent: f64, blocks_per_second: f64) -> FailureProb {
    let ratio = stake_percent / 100.0;
    let per_block = per_block_failure(p, ratio);
    let blocks_to_fail = if per_block > 0.0 {
        1.0 / per_block
    } else {
        f64::INFINITY
    };
    FailureProb {
        adversarial_stake: stake_percent,
        per_round_failure: per_round_failure(p, ratio),
        per_block_failure: per_block,
        expected_blocks_to_fail: blocks_to_fail,
        years_to_failure: blocks_to_fail / blocks_per_second / SECONDS_PER_YEAR,
    }
}

fn analyze_liveness(p: &Parameters, total_nodes: usize) -> LivenessAnalysis {
    let max_crashes = p.k.saturating_sub(p.alpha_preference);
    let crash_tolerance_percent = if p.k == 0 {
        0.0
    } else {
        max_crashes as f64 / p.k as f64 * 100.0
    };
    let partition_tolerance_percent = if total_nodes == 0 {
        0.0
    } else {
        (total_nodes as f64 - p.alpha_preference as f64) / total_nodes as f64 * 100.0
    };

    LivenessAnalysis {
        min_honest_nodes_for_progress: p.alpha_preference,
        max_tolerable_crashes: max_crashes,
        crash_tolerance_percent,
        partition_tolerance_percent,
    }
}

fn analyze_throughput(
    p: &Parameters,
    latency: &LatencyAnalysis,
    txs_per_block: u64,
) -> ThroughputAnalysis {
    let max_blocks_per_second = 1.0 / latency.expected_finality.as_secs_f64();
    let pipeline_utilization = if p.beta == 0 {
        1.0
    } else {
        (p.concurrent_repolls as f64 / p.beta as f64).min(1.0)
    };

    let processing_bottleneck = if p.concurrent_repolls < p.beta {
        Bottleneck::PipelineDepth
    } else if p.max_outstanding_items < p.optimal_processing.saturating_mul(10) {
        Bottleneck::OutstandingItemLimit
    } else {
        Bottleneck::NetworkLatency
    };

    ThroughputAnalysis {
        // Float-to-int casts saturate, so instantaneous finality yields u64::MAX.
        max_transactions_per_second: (max_blocks_per_second * txs_per_block as f64) as u64,
        max_blocks_per_second,
        pipeline_utilization,
        processing_bottleneck,
    }
}

fn recommendations(report: &CheckerReport) -> Vec<String> {
    let p = &report.parameters;
    let mut recs = Vec::new();

    if p.concurrent_repolls < p.beta {
        recs.push(format!(
            "Increase ConcurrentRepolls to {} to maximize throughput",
            p.beta
        ));
    }
    if report.safety_cutoff < 25.0 {
        recs.push(format!(
            "Safety cutoff is {:.1}% - consider increasing AlphaConfidence or Beta",
            report.safety_cutoff
        ));
    }
    if report.liveness_analysis.crash_tolerance_percent < 20.0 {
        recs.push(
            "Low crash tolerance - consider reducing AlphaPreference for better liveness"
                .to_string(),
        );
    }
    if report.latency_analysis.expected_finality > Duration::from_secs(1) {
        if p.beta > 10 {
            recs.push(
                "High finality latency - consider reducing Beta if safety margins allow"
                    .to_string(),
            );
        }
        if p.concurrent_repolls < p.beta {
            recs.push(
                "Improve latency by increasing ConcurrentRepolls for better pipelining".to_string(),
            );
        }
    }
    if report.total_nodes <= 10 && p.k < report.total_nodes {
        recs.push(format!(
            "Small network - consider setting K={} to sample all nodes",
            report.total_nodes
        ));
    }

    recs
}

impl CheckerReport {
    /// Plain-language walk through how consensus behaves with these settings.
    pub fn narrative(&self) -> String {
        let p = &self.parameters;
        let la = &self.latency_analysis;
        let pref_pct = p.preference_quorum_percent();
        let conf_pct = p.confidence_quorum_percent();
        let at_cutoff = per_block_failure(p, self.safety_cutoff / 100.0);
        let sequential = la
            .round_time
            .saturating_mul(u32::try_from(p.beta).unwrap_or(u32::MAX));

        let mut out = String::new();
        if self.warnings.is_empty() && self.recommendations.is_empty() {
            out.push_str("No warnings or recommendations.\n\n");
        } else {
            out.push_str(&format!(
                "{} warning(s), {} recommendation(s).\n\n",
                self.warnings.len(),
                self.recommendations.len()
            ));
        }
        out.push_str(&format!(
            "1. SAMPLING: each node queries {} random validators per round.\n",
            p.k
        ));
        out.push_str(&format!(
            "2. PREFERENCE: {} agreeing validators ({pref_pct:.0}%) update a node's preference; \
             progress survives {} crashed or slow nodes.\n",
            p.alpha_preference,
            p.k.saturating_sub(p.alpha_preference)
        ));
        out.push_str(&format!(
            "3. CONFIDENCE: {} agreeing validators ({conf_pct:.0}%) count a round toward finality; \
             the adversary needs more than {} nodes in a sample to cause disagreement.\n",
            p.alpha_confidence,
            p.k.saturating_sub(p.alpha_confidence)
        ));
        out.push_str(&format!(
            "4. FINALIZATION: {} consecutive successful rounds; with {:.1}% adversarial stake \
             the chance of failure is {at_cutoff:.2e}.\n",
            p.beta, self.safety_cutoff
        ));
        out.push_str(&format!(
            "5. PIPELINING: {} rounds run concurrently, cutting latency from {sequential:?} to {:?} \
             at {:.0}% of the theoretical maximum throughput.",
            p.concurrent_repolls,
            la.expected_finality,
            la.pipeline_efficiency * 100.0
        ));
        out
    }
}

impl fmt::Display for CheckerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.parameters;
        writeln!(f, "Parameter configuration:")?;
        writeln!(f, "  Sample size (K): {} nodes", p.k)?;
        writeln!(
            f,
            "  Preference quorum: {}/{} ({:.1}%)",
            p.alpha_preference,
            p.k,
            p.preference_quorum_percent()
        )?;
        writeln!(
            f,
            "  Confidence quorum: {}/{} ({:.1}%)",
            p.alpha_confidence,
            p.k,
            p.confidence_quorum_percent()
        )?;
        writeln!(f, "  Finalization rounds (Beta): {}", p.beta)?;
        writeln!(f, "  Pipeline depth: {}", p.concurrent_repolls)?;

        if !self.warnings.is_empty() {
            writeln!(f, "\nWarnings:")?;
            for w in &self.warnings {
                writeln!(f, "  - {w}")?;
            }
        }

        let la = &self.latency_analysis;
        writeln!(f, "\nFinality timing:")?;
        writeln!(f, "  Expected finality: {:?}", la.expected_finality)?;
        writeln!(f, "  Theoretical minimum: {:?}", la.theoretical_minimum)?;
        writeln!(f, "  Worst case: {:?}", la.worst_case_finality)?;
        writeln!(f, "  Pipeline efficiency: {:.0}%", la.pipeline_efficiency * 100.0)?;

        writeln!(f, "\nFailure probabilities:")?;
        writeln!(f, "  Adversary | Per-round | Per-block | Expected time to failure")?;
        for fp in &self.failure_probabilities {
            writeln!(
                f,
                "  {:>8.0}% | {:.2e} | {:.2e} | {}",
                fp.adversarial_stake,
                fp.per_round_failure,
                fp.per_block_failure,
                time_to_failure(fp.years_to_failure)
            )?;
        }
        writeln!(
            f,
            "  Safety cutoff (epsilon <= {:.0e}): {:.1}% adversarial stake",
            self.epsilon, self.safety_cutoff
        )?;

        let lv = &self.liveness_analysis;
        writeln!(f, "\nLiveness:")?;
        writeln!(
            f,
            "  Tolerates {}/{} ({:.0}%) crashed nodes",
            lv.max_tolerable_crashes, p.k, lv.crash_tolerance_percent
        )?;
        writeln!(
            f,
            "  Partition tolerance: {:.0}% unreachable",
            lv.partition_tolerance_percent
        )?;
        writeln!(
            f,
            "  Minimum honest nodes for progress: {}",
            lv.min_honest_nodes_for_progress
        )?;

        let ta = &self.throughput_analysis;
        writeln!(f, "\nThroughput:")?;
        writeln!(f, "  Max blocks/second: {:.2}", ta.max_blocks_per_second)?;
        writeln!(f, "  Max transactions/second: ~{}", ta.max_transactions_per_second)?;
        writeln!(f, "  Pipeline utilization: {:.0}%", ta.pipeline_utilization * 100.0)?;
        write!(f, "  Bottleneck: {}", ta.processing_bottleneck)?;

        if !self.recommendations.is_empty() {
            writeln!(f, "\n\nRecommendations:")?;
            for (i, rec) in self.recommendations.iter().enumerate() {
                write!(f, "  {}. {rec}", i + 1)?;
                if i + 1 < self.recommendations.len() {
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

fn time_to_failure(years: f64) -> String {
    if years.is_nan() || years >= 1e15 {
        "Never".to_string()
    } else if years > 1.0 {
        format!("{years:.1} years")
    } else if years * 365.0 > 1.0 {
        format!("{:.1} days", years * 365.0)
    } else {
        format!("{:.1} hours", years * 365.0 * 24.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowtune_params::{LOCAL, MAINNET, TESTNET};

    #[test]
    fn mainnet_report_shape() {
        let report = run_checker(&MAINNET, 21, 50);
        assert_eq!(report.failure_probabilities.len(), 7);
        assert_eq!(report.latency_analysis.expected_finality, Duration::from_millis(400));
        assert_eq!(report.latency_analysis.theoretical_minimum, Duration::from_millis(50));
        assert_eq!(report.latency_analysis.worst_case_finality, Duration::from_millis(800));
        assert_eq!(report.latency_analysis.pipeline_efficiency, 1.0);
        assert!((report.safety_cutoff - 69.2553).abs() < 1e-3);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn mainnet_liveness_and_throughput() {
        let report = run_checker(&MAINNET, 21, 50);
        let lv = report.liveness_analysis;
        assert_eq!(lv.min_honest_nodes_for_progress, 13);
        assert_eq!(lv.max_tolerable_crashes, 8);
        assert!((lv.crash_tolerance_percent - 800.0 / 21.0).abs() < 1e-9);
        assert!((lv.partition_tolerance_percent - 800.0 / 21.0).abs() < 1e-9);

        let ta = report.throughput_analysis;
        assert!((ta.max_blocks_per_second - 2.5).abs() < 1e-12);
        assert_eq!(ta.max_transactions_per_second, 250);
        // 369 < 10 x 10 is false
        assert_eq!(ta.processing_bottleneck, Bottleneck::NetworkLatency);
    }

    #[test]
    fn failure_table_follows_stakes() {
        let report = run_checker(&MAINNET, 21, 50);
        let stakes: Vec<f64> = report
            .failure_probabilities
            .iter()
            .map(|fp| fp.adversarial_stake)
            .collect();
        assert_eq!(stakes, [10.0, 20.0, 25.0, 30.0, 33.0, 40.0, 50.0]);

        let at_50 = report.failure_probabilities[6];
        assert!((at_50.per_block_failure - 9.471_286_300_6e-26).abs() / at_50.per_block_failure < 1e-6);
        assert!((at_50.expected_blocks_to_fail * at_50.per_block_failure - 1.0).abs() < 1e-9);
        assert!(
            (at_50.years_to_failure - at_50.expected_blocks_to_fail / SECONDS_PER_YEAR).abs()
                / at_50.years_to_failure
                < 1e-12
        );
    }

    #[test]
    fn warnings_for_broken_quorums() {
        let params = Parameters {
            k: 2,
            alpha_preference: 1,
            alpha_confidence: 1,
            beta: 4,
            concurrent_repolls: 2,
            ..LOCAL
        };
        let report = run_checker(&params, 40, 50);
        let joined = report.warnings.join("\n");
        assert!(joined.contains("CRITICAL: K < 3"));
        assert!(joined.contains("AlphaPreference (1) <= 50% of K (2)"));
        assert!(joined.contains("PERFORMANCE: ConcurrentRepolls (2) < Beta (4)"));
        assert!(joined.contains("SAFETY: Low confidence quorum 50%"));
        assert_eq!(report.throughput_analysis.processing_bottleneck, Bottleneck::PipelineDepth);
    }

    #[test]
    fn warning_for_inverted_quorums() {
        let params = Parameters {
            alpha_preference: 18,
            alpha_confidence: 13,
            ..MAINNET
        };
        let report = run_checker(&params, 21, 50);
        assert!(report.warnings.iter().any(|w| {
            w == "CRITICAL: AlphaConfidence (13) < AlphaPreference (18) - invalid configuration"
        }));
    }

    #[test]
    fn warning_for_zero_beta() {
        let params = Parameters { beta: 0, ..MAINNET };
        let report = run_checker(&params, 21, 50);
        assert!(report
            .warnings
            .iter()
            .any(|w| w == "CRITICAL: Beta < 1 - no rounds to achieve finality"));
        assert_eq!(report.latency_analysis.pipeline_efficiency, 0.0);
        // With no rounds to pass, every stake breaks safety.
        assert_eq!(report.safety_cutoff, 0.0);
    }

    #[test]
    fn outstanding_limit_bottleneck() {
        let params = Parameters {
            optimal_processing: 10,
            max_outstanding_items: 50,
            ..MAINNET
        };
        let report = run_checker(&params, 21, 50);
        // Pipeline is full (8 >= 8), but 50 < 10 x 10.
        assert_eq!(
            report.throughput_analysis.processing_bottleneck,
            Bottleneck::OutstandingItemLimit
        );
        assert!(report.to_string().contains("Bottleneck: Outstanding item limit"));
    }

    #[test]
    fn recommendation_for_low_crash_tolerance() {
        let params = Parameters {
            alpha_preference: 18,
            ..MAINNET
        };
        let report = run_checker(&params, 21, 50);
        // 3 / 21 = 14.3% of the sample may crash.
        assert!(report.liveness_analysis.crash_tolerance_percent < 20.0);
        assert!(report.recommendations.iter().any(|r| {
            r == "Low crash tolerance - consider reducing AlphaPreference for better liveness"
        }));
    }

    #[test]
    fn warnings_for_network_size() {
        let report = run_checker(&MAINNET, 11, 50);
        assert!(report.warnings.iter().any(|w| w == "INVALID: K (21) > total nodes (11)"));

        let report = run_checker(&LOCAL, 20, 50);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("SUBOPTIMAL: Only sampling 5/20 (25%)")));
    }

    #[test]
    fn zero_total_nodes_reports_zero_percentages() {
        let report = run_checker(&MAINNET, 0, 50);
        assert_eq!(report.liveness_analysis.partition_tolerance_percent, 0.0);
        assert!(report
            .warnings
            .iter()
            .any(|w| w == "INVALID: total node count is zero"));
    }

    #[test]
    fn high_quorum_liveness_warning() {
        let params = Parameters {
            alpha_confidence: 20,
            ..MAINNET
        };
        let report = run_checker(&params, 21, 50);
        assert!(report.warnings.iter().any(|w| w.starts_with("LIVENESS: High confidence quorum 95%")));
    }

    #[test]
    fn recommendations_for_local_preset() {
        let report = run_checker(&LOCAL, 5, 50);
        // cutoff ~19% < 25%; crash tolerance 1/5 = 20% is not below 20%.
        assert!(report.recommendations.iter().any(|r| r.starts_with("Safety cutoff is 19.")));
        assert!(!report.recommendations.iter().any(|r| r.starts_with("Low crash tolerance")));
    }

    #[test]
    fn recommendations_for_slow_shallow_pipeline() {
        let params = Parameters {
            beta: 20,
            concurrent_repolls: 4,
            ..MAINNET
        };
        let report = run_checker(&params, 8, 500);
        let recs = &report.recommendations;
        assert!(recs.contains(&"Increase ConcurrentRepolls to 20 to maximize throughput".to_string()));
        // finality = 500ms x 4 = 2s
        assert!(recs.iter().any(|r| r.starts_with("High finality latency")));
        assert!(recs.iter().any(|r| r.starts_with("Improve latency")));
    }

    #[test]
    fn small_network_sampling_recommendation() {
        let params = Parameters {
            k: 5,
            ..LOCAL
        };
        let report = run_checker(&params, 9, 50);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r == "Small network - consider setting K=9 to sample all nodes"));
    }

    #[test]
    fn zero_latency_saturates_throughput() {
        let report = run_checker(&TESTNET, 11, 0);
        assert!(report.throughput_analysis.max_blocks_per_second.is_infinite());
        assert_eq!(report.throughput_analysis.max_transactions_per_second, u64::MAX);
    }

    #[test]
    fn custom_options() {
        let options = CheckerOptions {
            epsilon: 1e-6,
            adversarial_stakes: vec![33.0],
            txs_per_block: 1000,
            blocks_per_second: 2.0,
        };
        let report = run_checker_with(&MAINNET, 21, 50, &options).unwrap();
        assert_eq!(report.failure_probabilities.len(), 1);
        assert_eq!(report.throughput_analysis.max_transactions_per_second, 2500);
        assert!(report.safety_cutoff > run_checker(&MAINNET, 21, 50).safety_cutoff);
    }

    #[test]
    fn rejects_bad_options() {
        let bad_stake = CheckerOptions {
            adversarial_stakes: vec![120.0],
            ..CheckerOptions::default()
        };
        assert!(matches!(
            run_checker_with(&MAINNET, 21, 50, &bad_stake),
            Err(EngineError::InvalidOptions(_))
        ));
        let bad_eps = CheckerOptions {
            epsilon: 0.0,
            ..CheckerOptions::default()
        };
        assert!(matches!(
            run_checker_with(&MAINNET, 21, 50, &bad_eps),
            Err(EngineError::InvalidEpsilon(_))
        ));
    }

    #[test]
    fn json_uses_wire_names() {
        let report = run_checker(&MAINNET, 21, 50);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["parameters"]["alphaConfidence"], 18);
        assert_eq!(json["latencyAnalysis"]["expectedFinality"], 400_000_000u64);
        assert_eq!(json["throughputAnalysis"]["processingBottleneck"], "Network latency");
        assert_eq!(json["failureProbabilities"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn text_rendering() {
        let report = run_checker(&MAINNET, 21, 50);
        let text = report.to_string();
        assert!(text.contains("Sample size (K): 21 nodes"));
        assert!(text.contains("Expected finality: 400ms"));
        assert!(text.contains("Safety cutoff (epsilon <= 1e-9): 69.3% adversarial stake"));
        assert!(report.narrative().contains("4. FINALIZATION: 8 consecutive"));
    }

    #[test]
    fn time_to_failure_buckets() {
        assert_eq!(time_to_failure(f64::INFINITY), "Never");
        assert_eq!(time_to_failure(2e15), "Never");
        assert_eq!(time_to_failure(3.0), "3.0 years");
        assert_eq!(time_to_failure(0.5), "182.5 days");
        assert_eq!(time_to_failure(1.0 / 365.0 / 2.0), "12.0 hours");
    }
}
