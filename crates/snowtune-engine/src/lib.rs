#![doc = include_str!("../README.md")]

pub mod checker;
pub mod cutoff;
pub mod error;
pub mod probability;
pub mod safety;
pub mod tuning;

pub use checker::{
    run_checker, run_checker_with, Bottleneck, CheckerOptions, CheckerReport, FailureProb,
    LatencyAnalysis, LivenessAnalysis, ThroughputAnalysis,
};
pub use cutoff::find_safety_cutoff;
pub use error::EngineError;
pub use probability::{analyze_probabilities, ProbabilityAnalysis};
pub use safety::{
    analyze_safety, recommend_parameters, validate_for_production, Recommendation, SafetyLevel,
    SafetyReport,
};
pub use tuning::{tune_byzantine_tolerance, tune_safety_cutoff, TuneStrategy};
