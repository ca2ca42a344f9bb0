//! Named reference parameter sets.

use std::sync::LazyLock;
use std::time::Duration;

use indexmap::IndexMap;

use crate::error::ParamsError;
use crate::parameters::Parameters;

/// 21-validator production network.
pub const MAINNET: Parameters = Parameters {
    k: 21,
    alpha_preference: 13,
    alpha_confidence: 18,
    beta: 8,
    concurrent_repolls: 8,
    optimal_processing: 10,
    max_outstanding_items: 369,
    max_item_processing_time: Duration::from_millis(9_630),
};

/// 11-validator public test network.
pub const TESTNET: Parameters = Parameters {
    k: 11,
    alpha_preference: 8,
    alpha_confidence: 9,
    beta: 10,
    concurrent_repolls: 10,
    optimal_processing: 10,
    max_outstanding_items: 256,
    max_item_processing_time: Duration::from_millis(6_900),
};

/// 5-node development network.
pub const LOCAL: Parameters = Parameters {
    k: 5,
    alpha_preference: 4,
    alpha_confidence: 4,
    beta: 4,
    concurrent_repolls: 4,
    optimal_processing: 32,
    max_outstanding_items: 1024,
    max_item_processing_time: Duration::from_millis(3_690),
};

/// Mainnet quorums with a near-zero item deadline, for load generation.
pub const BENCHMARK: Parameters = Parameters {
    max_item_processing_time: Duration::from_nanos(96_369),
    ..MAINNET
};

static PRESETS: LazyLock<IndexMap<&'static str, Parameters>> = LazyLock::new(|| {
    IndexMap::from([
        ("mainnet", MAINNET),
        ("testnet", TESTNET),
        ("local", LOCAL),
        ("benchmark", BENCHMARK),
    ])
});

/// Looks up a preset by name, ignoring case and surrounding whitespace.
pub fn preset(name: &str) -> Result<Parameters, ParamsError> {
    let key = name.trim().to_ascii_lowercase();
    PRESETS
        .get(key.as_str())
        .copied()
        .ok_or_else(|| ParamsError::UnknownNetwork {
            name: name.to_string(),
        })
}

/// Canonical preset names in catalog order.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.keys().copied()
}
