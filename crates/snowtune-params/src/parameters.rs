//! Consensus parameter model and the closed-form timing calculator.

use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::duration_nanos;
use crate::error::ParamsError;

/// Parameters for a Snowball-family sampling consensus.
///
/// Field names serialize in camelCase (`k`, `alphaPreference`, ...).
/// `maxItemProcessingTime` is carried as integer nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    /// Sample size (k) - number of validators polled per round
    pub k: usize,

    /// Vote threshold to change preference (liveness threshold)
    pub alpha_preference: usize,

    /// Vote threshold for a round to count toward finalization (safety threshold)
    pub alpha_confidence: usize,

    /// Consecutive successful confidence rounds required for finalization
    pub beta: usize,

    /// Polls kept in flight simultaneously
    pub concurrent_repolls: usize,

    /// Items processed in parallel under normal load
    pub optimal_processing: usize,

    /// Maximum consensus items outstanding at once
    pub max_outstanding_items: usize,

    /// Maximum time to process a single item
    #[serde(with = "crate::duration_nanos")]
    pub max_item_processing_time: Duration,
}

/// Per-round fault tolerance of the two quorums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultTolerance {
    /// Unresponsive or adversarial samples the preference quorum absorbs (k - alpha_preference)
    pub preference: usize,
    /// Unresponsive or adversarial samples the confidence quorum absorbs (k - alpha_confidence)
    pub confidence: usize,
}

impl Parameters {
    /// Checks the hard invariants, including that `max_item_processing_time`
    /// fits the nanosecond wire encoding.
    ///
    /// Soft conditions (a strict-majority preference quorum, pipeline depth
    /// not above `beta`) are reported by the checker instead.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.k == 0 {
            return Err(ParamsError::invalid("k", "must be positive", self.k));
        }
        if self.alpha_preference == 0 || self.alpha_preference > self.k {
            return Err(ParamsError::invalid(
                "alphaPreference",
                format!("must be between 1 and k ({})", self.k),
                self.alpha_preference,
            ));
        }
        if self.alpha_confidence == 0 || self.alpha_confidence > self.k {
            return Err(ParamsError::invalid(
                "alphaConfidence",
                format!("must be between 1 and k ({})", self.k),
                self.alpha_confidence,
            ));
        }
        if self.alpha_confidence < self.alpha_preference {
            return Err(ParamsError::invalid(
                "alphaConfidence",
                format!(
                    "must not be less than alphaPreference ({})",
                    self.alpha_preference
                ),
                self.alpha_confidence,
            ));
        }
        if self.beta == 0 {
            return Err(ParamsError::invalid("beta", "must be positive", self.beta));
        }
        if self.concurrent_repolls == 0 {
            return Err(ParamsError::invalid(
                "concurrentRepolls",
                "must be positive",
                self.concurrent_repolls,
            ));
        }
        if self.optimal_processing == 0 {
            return Err(ParamsError::invalid(
                "optimalProcessing",
                "must be positive",
                self.optimal_processing,
            ));
        }
        if self.max_outstanding_items == 0 {
            return Err(ParamsError::invalid(
                "maxOutstandingItems",
                "must be positive",
                self.max_outstanding_items,
            ));
        }
        if self.max_item_processing_time.is_zero() {
            return Err(ParamsError::invalid(
                "maxItemProcessingTime",
                "must be positive",
                format!("{:?}", self.max_item_processing_time),
            ));
        }
        if duration_nanos::to_nanos(self.max_item_processing_time).is_none() {
            return Err(ParamsError::invalid(
                "maxItemProcessingTime",
                "must not exceed u64::MAX nanoseconds",
                format!("{:?}", self.max_item_processing_time),
            ));
        }
        Ok(())
    }

    /// Expected time to finality for a given one-way round latency.
    ///
    /// Each of the `beta` confirmation rounds costs one round time; the
    /// result is divided by the pipeline factor `max(1, beta / concurrent_repolls)`.
    pub fn expected_finality(&self, network_latency_ms: u64) -> Duration {
        let round_time = Duration::from_millis(network_latency_ms);
        let raw = round_time.as_nanos() * self.beta as u128;

        let depth = self.concurrent_repolls.max(1) as f64;
        let pipeline_factor = (self.beta as f64 / depth).max(1.0);
        if pipeline_factor <= 1.0 {
            return saturating_nanos(raw);
        }
        let scaled = (raw as f64 / pipeline_factor).round();
        saturating_nanos(scaled as u128)
    }

    /// Samples each quorum can lose per round and still be met.
    pub fn fault_tolerance(&self) -> FaultTolerance {
        FaultTolerance {
            preference: self.k.saturating_sub(self.alpha_preference),
            confidence: self.k.saturating_sub(self.alpha_confidence),
        }
    }

    /// `alpha_preference / k` as a percentage.
    pub fn preference_quorum_percent(&self) -> f64 {
        percent(self.alpha_preference, self.k)
    }

    /// `alpha_confidence / k` as a percentage.
    pub fn confidence_quorum_percent(&self) -> f64 {
        percent(self.alpha_confidence, self.k)
    }

    /// Pretty-printed JSON encoding.
    pub fn to_json(&self) -> Result<String, ParamsError> {
        serde_json::to_string_pretty(self).map_err(|e| ParamsError::Serialization(e.to_string()))
    }

    /// Decodes parameters from JSON without validating them.
    pub fn from_json(data: &str) -> Result<Self, ParamsError> {
        serde_json::from_str(data).map_err(|e| ParamsError::Serialization(e.to_string()))
    }

    /// Human-readable summary of the parameters and their derived timings.
    pub fn summary(&self) -> String {
        let tolerance = self.fault_tolerance();
        let finality_50 = self.expected_finality(50);
        let finality_100 = self.expected_finality(100);

        let mut out = String::new();
        let _ = writeln!(out, "Consensus Parameters Summary:");
        let _ = writeln!(out, "- Sample Size (K): {} nodes", self.k);
        let _ = writeln!(
            out,
            "- Preference Quorum: {}/{} ({:.1}%) - tolerates {} failures",
            self.alpha_preference,
            self.k,
            self.preference_quorum_percent(),
            tolerance.preference
        );
        let _ = writeln!(
            out,
            "- Confidence Quorum: {}/{} ({:.1}%) - tolerates {} failures",
            self.alpha_confidence,
            self.k,
            self.confidence_quorum_percent(),
            tolerance.confidence
        );
        let _ = writeln!(out, "- Finalization Rounds (Beta): {}", self.beta);
        let _ = writeln!(out, "- Concurrent Polls: {}", self.concurrent_repolls);
        let _ = writeln!(
            out,
            "- Expected Finality: {:.2}s (50ms network), {:.2}s (100ms network)",
            finality_50.as_secs_f64(),
            finality_100.as_secs_f64()
        );
        let _ = writeln!(out, "- Max Outstanding Items: {}", self.max_outstanding_items);
        let _ = write!(
            out,
            "- Max Item Processing Time: {:?}",
            self.max_item_processing_time
        );
        out
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

fn saturating_nanos(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{LOCAL, MAINNET, TESTNET};

    fn valid() -> Parameters {
        Parameters {
            k: 11,
            alpha_preference: 8,
            alpha_confidence: 9,
            beta: 10,
            concurrent_repolls: 10,
            optimal_processing: 10,
            max_outstanding_items: 256,
            max_item_processing_time: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_valid_params() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_invalid_k() {
        let err = Parameters { k: 0, ..valid() }.validate().unwrap_err();
        assert_eq!(err.field(), Some("k"));
    }

    #[test]
    fn test_alpha_preference_above_k() {
        let params = Parameters {
            k: 11,
            alpha_preference: 12,
            alpha_confidence: 9,
            beta: 10,
            ..valid()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, ParamsError::InvalidParameters { .. }));
        assert_eq!(err.field(), Some("alphaPreference"));
    }

    #[test]
    fn test_alpha_confidence_below_preference() {
        let params = Parameters {
            alpha_preference: 9,
            alpha_confidence: 8,
            ..valid()
        };
        assert_eq!(params.validate().unwrap_err().field(), Some("alphaConfidence"));
    }

    #[test]
    fn test_zero_fields_rejected() {
        let cases: [(Parameters, &str); 6] = [
            (Parameters { alpha_preference: 0, ..valid() }, "alphaPreference"),
            (Parameters { beta: 0, ..valid() }, "beta"),
            (Parameters { concurrent_repolls: 0, ..valid() }, "concurrentRepolls"),
            (Parameters { optimal_processing: 0, ..valid() }, "optimalProcessing"),
            (Parameters { max_outstanding_items: 0, ..valid() }, "maxOutstandingItems"),
            (
                Parameters {
                    max_item_processing_time: Duration::ZERO,
                    ..valid()
                },
                "maxItemProcessingTime",
            ),
        ];
        for (params, field) in cases {
            assert_eq!(params.validate().unwrap_err().field(), Some(field));
        }
    }

    #[test]
    fn test_mainnet_expected_finality() {
        // beta == concurrent_repolls, so no pipelining discount: 8 x 50ms.
        assert_eq!(MAINNET.expected_finality(50), Duration::from_millis(400));
    }

    #[test]
    fn test_expected_finality_with_shallow_pipeline() {
        let params = Parameters {
            beta: 20,
            concurrent_repolls: 5,
            ..valid()
        };
        // raw = 20 x 10ms = 200ms, factor = 20 / 5 = 4.
        assert_eq!(params.expected_finality(10), Duration::from_millis(50));
    }

    #[test]
    fn test_expected_finality_zero_latency() {
        assert_eq!(MAINNET.expected_finality(0), Duration::ZERO);
    }

    #[test]
    fn test_mainnet_fault_tolerance() {
        assert_eq!(
            MAINNET.fault_tolerance(),
            FaultTolerance {
                preference: 8,
                confidence: 3
            }
        );
    }

    #[test]
    fn test_json_round_trip_presets() {
        for params in [MAINNET, TESTNET, LOCAL] {
            let json = params.to_json().unwrap();
            let decoded = Parameters::from_json(&json).unwrap();
            assert_eq!(decoded, params);
        }
    }

    #[test]
    fn test_json_wire_names() {
        let json = MAINNET.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["k"], 21);
        assert_eq!(value["alphaPreference"], 13);
        assert_eq!(value["alphaConfidence"], 18);
        assert_eq!(value["beta"], 8);
        assert_eq!(value["concurrentRepolls"], 8);
        assert_eq!(value["optimalProcessing"], 10);
        assert_eq!(value["maxOutstandingItems"], 369);
        assert_eq!(value["maxItemProcessingTime"], 9_630_000_000u64);
    }

    #[test]
    fn test_processing_time_must_fit_wire_encoding() {
        let at_limit = Parameters {
            max_item_processing_time: duration_nanos::MAX,
            ..MAINNET
        };
        assert!(at_limit.validate().is_ok());
        let json = at_limit.to_json().unwrap();
        assert_eq!(Parameters::from_json(&json).unwrap(), at_limit);

        for too_long in [
            duration_nanos::MAX + Duration::from_nanos(1),
            Duration::from_secs(600 * 365 * 24 * 3600),
            Duration::MAX,
        ] {
            let params = Parameters {
                max_item_processing_time: too_long,
                ..MAINNET
            };
            let err = params.validate().unwrap_err();
            assert_eq!(err.field(), Some("maxItemProcessingTime"));
            assert!(matches!(params.to_json(), Err(ParamsError::Serialization(_))));
        }
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = Parameters::from_json("{\"k\": \"many\"}").unwrap_err();
        assert!(matches!(err, ParamsError::Serialization(_)));
    }

    #[test]
    fn test_summary_mentions_quorums() {
        let summary = MAINNET.summary();
        assert!(summary.contains("Sample Size (K): 21"));
        assert!(summary.contains("13/21"));
        assert!(summary.contains("18/21"));
        assert!(summary.contains("0.40s (50ms network)"));
    }
}
