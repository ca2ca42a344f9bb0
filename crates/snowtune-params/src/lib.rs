#![doc = include_str!("../README.md")]

pub mod builder;
pub mod duration_nanos;
pub mod error;
pub mod guidance;
pub mod optimal;
pub mod parameters;
pub mod presets;

pub use builder::{Builder, Objective};
pub use error::ParamsError;
pub use guidance::{parameter_guides, ParameterGuide};
pub use optimal::{calculate_optimal_parameters, NetworkCharacteristics, OptimalParameters};
pub use parameters::{FaultTolerance, Parameters};
pub use presets::{preset, preset_names, BENCHMARK, LOCAL, MAINNET, TESTNET};
