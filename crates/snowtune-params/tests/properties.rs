use std::time::Duration;

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence, RngAlgorithm};
use snowtune_params::{duration_nanos, preset, Builder, Parameters, MAINNET};

fn params_proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        source_file: Some(file!()),
        failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
            "proptest-regressions",
        ))),
        rng_algorithm: RngAlgorithm::ChaCha,
        ..ProptestConfig::default()
    }
}

fn any_parameters() -> impl Strategy<Value = Parameters> {
    (
        0usize..64,
        0usize..64,
        0usize..64,
        0usize..40,
        0usize..40,
        0usize..40,
        0usize..2048,
        processing_time(),
    )
        .prop_map(|(k, ap, ac, beta, cr, op, moi, timeout)| Parameters {
            k,
            alpha_preference: ap,
            alpha_confidence: ac,
            beta,
            concurrent_repolls: cr,
            optimal_processing: op,
            max_outstanding_items: moi,
            max_item_processing_time: timeout,
        })
}

/// Everyday timeouts, values around the `u64::MAX` nanosecond wire limit,
/// and `Duration::MAX`.
fn processing_time() -> impl Strategy<Value = Duration> {
    let limit_secs = duration_nanos::MAX.as_secs();
    prop_oneof![
        4 => (0u64..20_000_000_000).prop_map(Duration::from_nanos),
        2 => (limit_secs - 1..=limit_secs + 1, 0u32..1_000_000_000)
            .prop_map(|(secs, nanos)| Duration::new(secs, nanos)),
        1 => Just(Duration::MAX),
    ]
}

fn satisfies_invariants(p: &Parameters) -> bool {
    p.k >= 1
        && (1..=p.k).contains(&p.alpha_preference)
        && (1..=p.k).contains(&p.alpha_confidence)
        && p.alpha_confidence >= p.alpha_preference
        && p.beta >= 1
        && p.concurrent_repolls >= 1
        && p.optimal_processing >= 1
        && p.max_outstanding_items >= 1
        && !p.max_item_processing_time.is_zero()
        && p.max_item_processing_time <= duration_nanos::MAX
}

proptest! {
    #![proptest_config(params_proptest_config())]

    #[test]
    fn validation_accepts_exactly_the_invariants(p in any_parameters()) {
        prop_assert_eq!(p.validate().is_ok(), satisfies_invariants(&p));
    }

    #[test]
    fn json_round_trip(p in any_parameters()) {
        match p.to_json() {
            Ok(json) => prop_assert_eq!(Parameters::from_json(&json).unwrap(), p),
            Err(_) => prop_assert!(p.max_item_processing_time > duration_nanos::MAX),
        }
    }

    #[test]
    fn valid_parameters_always_encode(p in any_parameters()) {
        if p.validate().is_ok() {
            prop_assert!(p.to_json().is_ok());
        }
    }

    #[test]
    fn node_count_always_builds(n in 1usize..=1000) {
        let params = Builder::new().for_node_count(n).build().unwrap();
        prop_assert!(params.alpha_preference <= params.alpha_confidence);
        prop_assert!(params.alpha_confidence <= params.k);
        prop_assert!(params.k <= n);
    }

    #[test]
    fn finality_non_decreasing_in_beta(
        beta in 1usize..200,
        cr in 1usize..200,
        latency in 0u64..500,
    ) {
        let base = Parameters { beta, concurrent_repolls: cr, ..MAINNET };
        let next = Parameters { beta: beta + 1, ..base };
        prop_assert!(base.expected_finality(latency) <= next.expected_finality(latency));
    }

    #[test]
    fn pipelining_never_exceeds_sequential_rounds(
        beta in 1usize..200,
        cr in 1usize..200,
        latency in 0u64..500,
    ) {
        let p = Parameters { beta, concurrent_repolls: cr, ..MAINNET };
        let sequential = Duration::from_millis(latency) * beta as u32;
        let pipelined = Duration::from_millis(latency) * beta.min(cr) as u32;
        let finality = p.expected_finality(latency);
        prop_assert!(finality <= sequential);
        let drift = finality.as_nanos().abs_diff(pipelined.as_nanos());
        prop_assert!(drift <= 1, "finality={finality:?} pipelined={pipelined:?}");
    }
}

#[test]
fn mainnet_scenarios() {
    let mainnet = preset("mainnet").unwrap();
    assert_eq!(mainnet.expected_finality(50), Duration::from_millis(400));
    let tolerance = mainnet.fault_tolerance();
    assert_eq!((tolerance.preference, tolerance.confidence), (8, 3));
}
