//! Static reference material describing each parameter.

use serde::Serialize;

/// Selection guidance for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterGuide {
    /// Parameter name as shown to operators.
    pub parameter: &'static str,
    pub description: &'static str,
    /// Constraint or rule of thumb tying the value to other parameters.
    pub formula: &'static str,
    pub min_value: &'static str,
    pub max_value: &'static str,
    pub typical: &'static str,
    pub impact: &'static str,
    pub trade_offs: &'static str,
}

const GUIDES: [ParameterGuide; 8] = [
    ParameterGuide {
        parameter: "K (Sample Size)",
        description: "Number of validators randomly sampled in each consensus round",
        formula: "K <= TotalNodes; typically K = min(TotalNodes, 20-50)",
        min_value: "1",
        max_value: "TotalNodes",
        typical: "5-21 for small networks, 20-50 for large networks",
        impact: "Higher K gives stronger statistical guarantees at more network overhead",
        trade_offs: "Security vs performance: message complexity per round is O(K)",
    },
    ParameterGuide {
        parameter: "AlphaPreference",
        description: "Quorum threshold for changing preference (liveness threshold)",
        formula: "K/2 < AlphaPreference <= K; typically 60-75% of K",
        min_value: "K/2 + 1",
        max_value: "K",
        typical: "about 67% of K",
        impact: "Lower changes preference faster; higher keeps preferences stable",
        trade_offs: "Liveness vs stability: too low oscillates, too high can stall",
    },
    ParameterGuide {
        parameter: "AlphaConfidence",
        description: "Quorum threshold for confidence and finalization (safety threshold)",
        formula: "AlphaPreference <= AlphaConfidence <= K; typically 75-85% of K",
        min_value: "AlphaPreference",
        max_value: "K",
        typical: "about 80% of K",
        impact: "Higher strengthens the finality guarantee; lower finalizes sooner",
        trade_offs: "Safety vs speed: higher values shrink the safety failure probability exponentially",
    },
    ParameterGuide {
        parameter: "Beta",
        description: "Consecutive successful rounds required for finalization",
        formula: "FinalityTime ~ Beta x RoundLatency / ConcurrentRepolls",
        min_value: "4",
        max_value: "100",
        typical: "8-20 for production, 4-8 for testing",
        impact: "Safety failure probability is the per-round failure raised to the power Beta",
        trade_offs: "Security vs latency: each additional round improves safety exponentially",
    },
    ParameterGuide {
        parameter: "ConcurrentRepolls",
        description: "Consensus rounds that can be pipelined",
        formula: "1 <= ConcurrentRepolls <= Beta",
        min_value: "1",
        max_value: "Beta",
        typical: "4-20, often equal to Beta",
        impact: "Higher improves throughput through pipelining",
        trade_offs: "Throughput vs cost: deeper pipelines use more memory and CPU",
    },
    ParameterGuide {
        parameter: "OptimalProcessing",
        description: "Target number of consensus items processed in parallel",
        formula: "Sized from available CPU cores and expected load",
        min_value: "1",
        max_value: "100",
        typical: "10-32 depending on hardware",
        impact: "Drives CPU utilization and response time",
        trade_offs: "Parallelism vs resources: too high causes context-switch overhead",
    },
    ParameterGuide {
        parameter: "MaxOutstandingItems",
        description: "Maximum consensus items in flight at once",
        formula: "At least OptimalProcessing x expected pipeline depth",
        min_value: "10",
        max_value: "10000",
        typical: "256-1024 for production",
        impact: "Caps memory usage and prevents overload",
        trade_offs: "Throughput vs memory: higher allows more parallelism at more RAM",
    },
    ParameterGuide {
        parameter: "MaxItemProcessingTime",
        description: "Timeout for processing a single consensus item",
        formula: "Well above the expected finality time",
        min_value: "100ms",
        max_value: "60s",
        typical: "5-10 seconds",
        impact: "Keeps stuck items from blocking progress",
        trade_offs: "Responsiveness vs tolerance: too low times out legitimately slow items",
    },
];

/// Guidance for every parameter, in field order.
pub fn parameter_guides() -> &'static [ParameterGuide] {
    &GUIDES
}
