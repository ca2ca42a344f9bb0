//! Graded safety assessment and production gating.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use snowtune_params::{Builder, Parameters};
use tracing::info;

use crate::error::EngineError;

/// Severity of a parameter set, from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyLevel {
    Optimal,
    Good,
    Warning,
    Critical,
    Danger,
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SafetyLevel::Optimal => "OPTIMAL",
            SafetyLevel::Good => "GOOD",
            SafetyLevel::Warning => "WARNING",
            SafetyLevel::Critical => "CRITICAL",
            SafetyLevel::Danger => "DANGER",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyReport {
    pub level: SafetyLevel,
    /// Problems that make the parameters unsafe.
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    /// One paragraph describing sampling, quorums, tolerances, and finality.
    pub explanation: String,
}

/// Grades `params` for a network of `total_nodes` validators.
pub fn analyze_safety(params: &Parameters, total_nodes: usize) -> SafetyReport {
    let p = params;
    let mut level = SafetyLevel::Optimal;
    let mut issues = Vec::new();
    let mut warnings = Vec::new();
    let mut suggestions = Vec::new();

    if p.k > total_nodes {
        level = SafetyLevel::Danger;
        issues.push(format!(
            "K ({}) cannot exceed total nodes ({total_nodes})",
            p.k
        ));
    } else if p.k < total_nodes / 2 {
        level = SafetyLevel::Warning;
        warnings.push(format!(
            "K ({}) is less than 50% of nodes ({total_nodes}), reducing safety",
            p.k
        ));
    }

    // The two quorum checks overwrite the level outright.
    let min_safe_alpha = p.k / 2 + 1;
    if p.alpha_preference < min_safe_alpha {
        level = SafetyLevel::Danger;
        issues.push(format!(
            "AlphaPreference ({}) must be > K/2 ({}) for safety",
            p.alpha_preference,
            p.k / 2
        ));
    }
    if p.alpha_confidence < p.alpha_preference {
        level = SafetyLevel::Critical;
        issues.push("AlphaConfidence must be >= AlphaPreference".to_string());
    }

    let tolerance = p.fault_tolerance();
    if total_nodes > 5 {
        let share = tolerance.confidence as f64 / total_nodes as f64;
        if share < 0.1 {
            level = level.max(SafetyLevel::Warning);
            warnings.push(format!(
                "Low fault tolerance: can only tolerate {} failures out of {total_nodes} nodes ({:.1}%)",
                tolerance.confidence,
                share * 100.0
            ));
        }
    }

    if p.beta < 4 {
        level = level.max(SafetyLevel::Warning);
        warnings.push("Beta < 4 may compromise finality guarantees".to_string());
        suggestions.push("Consider increasing Beta to at least 4 for production use".to_string());
    } else if p.beta > 100 {
        level = level.max(SafetyLevel::Warning);
        warnings.push(format!("Beta = {} is very high, may cause slow finality", p.beta));
    }

    if p.concurrent_repolls > p.beta {
        warnings.push("ConcurrentRepolls > Beta has no benefit".to_string());
        suggestions.push(format!("Set ConcurrentRepolls to {} (same as Beta)", p.beta));
    } else if p.concurrent_repolls < p.beta / 4 && p.beta > 8 {
        suggestions.push("Consider increasing ConcurrentRepolls for better throughput".to_string());
    }

    if p.max_outstanding_items < 10 {
        level = level.max(SafetyLevel::Warning);
        warnings.push("MaxOutstandingItems < 10 may severely limit throughput".to_string());
    }

    SafetyReport {
        level,
        issues,
        warnings,
        suggestions,
        explanation: explain(p, total_nodes),
    }
}

fn explain(p: &Parameters, total_nodes: usize) -> String {
    let tolerance = p.fault_tolerance();
    let conf_pct = p.confidence_quorum_percent();
    let sample_pct = if total_nodes == 0 {
        0.0
    } else {
        p.k as f64 / total_nodes as f64 * 100.0
    };

    let tier = if conf_pct >= 80.0 {
        "Strong safety guarantee with supermajority requirement"
    } else if conf_pct >= 67.0 {
        "Good safety with classical BFT-level security"
    } else {
        "Moderate safety - consider increasing AlphaConfidence"
    };

    [
        format!(
            "Sampling {} out of {total_nodes} nodes ({sample_pct:.1}%) per round",
            p.k
        ),
        format!(
            "Preference changes with {}/{} votes ({:.1}%), finalization requires {}/{} votes ({conf_pct:.1}%)",
            p.alpha_preference,
            p.k,
            p.preference_quorum_percent(),
            p.alpha_confidence,
            p.k
        ),
        format!(
            "Can tolerate {} failures for liveness, {} for safety",
            tolerance.preference, tolerance.confidence
        ),
        format!(
            "Expected finality: {:.2}s (50ms latency), {:.2}s (10ms latency)",
            p.expected_finality(50).as_secs_f64(),
            p.expected_finality(10).as_secs_f64()
        ),
        tier.to_string(),
    ]
    .join(". ")
}

/// Fails unless `params` are fit for a production network of `total_nodes`.
pub fn validate_for_production(params: &Parameters, total_nodes: usize) -> Result<(), EngineError> {
    let report = analyze_safety(params, total_nodes);
    if report.level >= SafetyLevel::Critical {
        return Err(EngineError::NotProductionReady(format!(
            "parameters not safe for production: {}",
            report.issues.join("; ")
        )));
    }
    if params.beta < 4 {
        return Err(EngineError::NotProductionReady(
            "Beta must be at least 4 for production use".to_string(),
        ));
    }
    if params.confidence_quorum_percent() < 67.0 {
        return Err(EngineError::NotProductionReady(
            "AlphaConfidence must be at least 67% of K for production".to_string(),
        ));
    }
    let tolerance = params.fault_tolerance().confidence;
    if total_nodes > 0 && tolerance as f64 / total_nodes as f64 > 0.33 {
        return Err(EngineError::NotProductionReady(
            "production networks should not tolerate more than 33% Byzantine nodes".to_string(),
        ));
    }
    Ok(())
}

/// Suggested parameters for a network, with their assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub parameters: Parameters,
    pub safety: SafetyReport,
}

/// Sizes parameters for `total_nodes` validators, optionally fitting `beta`
/// into a finality target at the given latency.
pub fn recommend_parameters(
    total_nodes: usize,
    target_finality: Option<Duration>,
    network_latency_ms: u64,
) -> Result<Recommendation, EngineError> {
    let mut builder = Builder::new().for_node_count(total_nodes);
    if let Some(target) = target_finality.filter(|t| !t.is_zero()) {
        builder = builder.with_target_finality(target, network_latency_ms);
    }
    let parameters = builder.build()?;

    let mut safety = analyze_safety(&parameters, total_nodes);
    if total_nodes <= 5 {
        safety.suggestions.push(format!(
            "For small networks (<=5 nodes), consider using all nodes (K={total_nodes})"
        ));
    } else if total_nodes > 100 {
        safety.suggestions.push(
            "For large networks (>100 nodes), consider capping K at 50-100 for performance"
                .to_string(),
        );
    }

    info!(
        total_nodes,
        k = parameters.k,
        beta = parameters.beta,
        level = %safety.level,
        "recommended parameters"
    );
    Ok(Recommendation { parameters, safety })
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowtune_params::{LOCAL, MAINNET, TESTNET};

    #[test]
    fn levels_are_ordered() {
        assert!(SafetyLevel::Optimal < SafetyLevel::Good);
        assert!(SafetyLevel::Warning < SafetyLevel::Critical);
        assert!(SafetyLevel::Critical < SafetyLevel::Danger);
        assert_eq!(SafetyLevel::Danger.to_string(), "DANGER");
    }

    #[test]
    fn mainnet_on_its_own_network() {
        let report = analyze_safety(&MAINNET, 21);
        // tolerance 3/21 = 14.3% is fine; nothing else fires.
        assert_eq!(report.level, SafetyLevel::Optimal);
        assert!(report.issues.is_empty());
        assert!(report.warnings.is_empty());
        assert!(report
            .explanation
            .starts_with("Sampling 21 out of 21 nodes (100.0%) per round. "));
        assert!(report
            .explanation
            .ends_with("Strong safety guarantee with supermajority requirement"));
    }

    #[test]
    fn oversized_sample_is_dangerous() {
        let report = analyze_safety(&MAINNET, 11);
        assert_eq!(report.level, SafetyLevel::Danger);
        assert_eq!(report.issues, ["K (21) cannot exceed total nodes (11)"]);
    }

    #[test]
    fn minority_preference_is_dangerous() {
        let params = Parameters {
            alpha_preference: 10,
            ..MAINNET
        };
        let report = analyze_safety(&params, 21);
        assert_eq!(report.level, SafetyLevel::Danger);
        assert_eq!(report.issues, ["AlphaPreference (10) must be > K/2 (10) for safety"]);
    }

    #[test]
    fn inverted_quorums_override_to_critical() {
        let params = Parameters {
            alpha_preference: 10,
            alpha_confidence: 9,
            ..MAINNET
        };
        let report = analyze_safety(&params, 21);
        assert_eq!(report.level, SafetyLevel::Critical);
        assert_eq!(report.issues.len(), 2);
    }

    #[test]
    fn undersampled_large_network_warns() {
        let report = analyze_safety(&MAINNET, 200);
        assert_eq!(report.level, SafetyLevel::Warning);
        assert!(report.warnings[0].starts_with("K (21) is less than 50% of nodes (200)"));
        assert!(report.warnings[1].starts_with("Low fault tolerance: can only tolerate 3 failures out of 200 nodes (1.5%)"));
    }

    #[test]
    fn pipeline_suggestions() {
        let deep = Parameters {
            concurrent_repolls: 12,
            ..MAINNET
        };
        let report = analyze_safety(&deep, 21);
        assert_eq!(report.warnings, ["ConcurrentRepolls > Beta has no benefit"]);
        assert_eq!(report.suggestions, ["Set ConcurrentRepolls to 8 (same as Beta)"]);
        assert_eq!(report.level, SafetyLevel::Optimal);

        let shallow = Parameters {
            beta: 40,
            concurrent_repolls: 4,
            ..MAINNET
        };
        let report = analyze_safety(&shallow, 21);
        assert_eq!(
            report.suggestions,
            ["Consider increasing ConcurrentRepolls for better throughput"]
        );
    }

    #[test]
    fn beta_and_queue_limits_warn() {
        let params = Parameters {
            beta: 2,
            concurrent_repolls: 2,
            max_outstanding_items: 5,
            ..TESTNET
        };
        let report = analyze_safety(&params, 11);
        assert_eq!(report.level, SafetyLevel::Warning);
        assert!(report.warnings.contains(&"Beta < 4 may compromise finality guarantees".to_string()));
        assert!(report
            .warnings
            .contains(&"MaxOutstandingItems < 10 may severely limit throughput".to_string()));
    }

    #[test]
    fn production_gate() {
        assert!(validate_for_production(&MAINNET, 21).is_ok());
        assert!(validate_for_production(&TESTNET, 11).is_ok());

        let err = validate_for_production(&MAINNET, 11).unwrap_err();
        assert_eq!(
            err,
            EngineError::NotProductionReady(
                "parameters not safe for production: K (21) cannot exceed total nodes (11)".into()
            )
        );

        let weak = Parameters {
            alpha_confidence: 13,
            ..MAINNET
        };
        assert!(matches!(
            validate_for_production(&weak, 21),
            Err(EngineError::NotProductionReady(msg)) if msg.contains("67%")
        ));
    }

    #[test]
    fn production_gate_rejects_short_beta() {
        let params = Parameters {
            beta: 3,
            concurrent_repolls: 3,
            ..MAINNET
        };
        assert!(matches!(
            validate_for_production(&params, 21),
            Err(EngineError::NotProductionReady(msg)) if msg.starts_with("Beta must be")
        ));
    }

    #[test]
    fn production_gate_accepts_full_sampling_of_small_network() {
        // 1 tolerated failure out of 5 nodes stays under a third.
        assert_eq!(validate_for_production(&LOCAL, 5), Ok(()));
    }

    #[test]
    fn recommends_for_small_network() {
        let rec = recommend_parameters(5, None, 50).unwrap();
        assert_eq!(rec.parameters.k, 5);
        assert_eq!(rec.parameters.beta, 11);
        assert!(rec
            .safety
            .suggestions
            .contains(&"For small networks (<=5 nodes), consider using all nodes (K=5)".to_string()));
    }

    #[test]
    fn recommends_with_finality_target() {
        let rec = recommend_parameters(21, Some(Duration::from_secs(1)), 50).unwrap();
        assert_eq!(rec.parameters.k, 21);
        assert_eq!(rec.parameters.beta, 20);
        assert_eq!(rec.parameters.concurrent_repolls, 20);
    }

    #[test]
    fn recommends_for_large_network() {
        let rec = recommend_parameters(500, None, 50).unwrap();
        assert_eq!(rec.parameters.k, 50);
        assert!(rec.safety.suggestions.iter().any(|s| s.starts_with("For large networks")));
    }

    #[test]
    fn empty_network_keeps_defaults_and_is_dangerous() {
        // for_node_count(0) keeps the defaults, which then exceed the network.
        let rec = recommend_parameters(0, None, 50).unwrap();
        assert_eq!(rec.safety.level, SafetyLevel::Danger);
    }
}
