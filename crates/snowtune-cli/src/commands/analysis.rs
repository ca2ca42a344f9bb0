// Command handlers that analyze an existing parameter set: check,
// probability, cutoff, and safety.

use serde::Serialize;
use snowtune_engine::{
    analyze_probabilities, analyze_safety, find_safety_cutoff, run_checker_with,
    validate_for_production, CheckerOptions, SafetyReport,
};
use snowtune_params::Parameters;

use super::helpers::{load_params, print_json};
use crate::cli::{OutputFormat, ParamsSource};

pub(crate) fn run_check(
    source: &ParamsSource,
    total_nodes: Option<usize>,
    network_latency: u64,
    epsilon: f64,
    format: OutputFormat,
) -> miette::Result<()> {
    let params = load_params(source)?;
    let options = CheckerOptions {
        epsilon,
        ..CheckerOptions::default()
    };
    let report = run_checker_with(
        &params,
        total_nodes.unwrap_or(params.k),
        network_latency,
        &options,
    )?;
    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            println!("{report}\n\n{}", report.narrative());
            Ok(())
        }
    }
}

pub(crate) fn run_probability(
    source: &ParamsSource,
    ratio: f64,
    format: OutputFormat,
) -> miette::Result<()> {
    let params = load_params(source)?;
    let analysis = analyze_probabilities(&params, ratio)?;
    match format {
        OutputFormat::Json => print_json(&analysis),
        OutputFormat::Text => {
            println!("Adversarial ratio: {:.1}%", ratio * 100.0);
            println!("Safety failure probability: {:.3e}", analysis.safety_failure_probability);
            println!(
                "Liveness failure probability: {:.3e}",
                analysis.liveness_failure_probability
            );
            println!("Expected rounds to finality: {:.2}", analysis.expected_rounds_to_finality);
            println!(
                "Probability of disagreement: {:.3e}",
                analysis.probability_of_disagreement
            );
            Ok(())
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CutoffOutput {
    parameters: Parameters,
    epsilon: f64,
    safety_cutoff: f64,
}

pub(crate) fn run_cutoff(source: &ParamsSource, epsilon: f64, format: OutputFormat) -> miette::Result<()> {
    let params = load_params(source)?;
    let cutoff = find_safety_cutoff(&params, epsilon)?;
    match format {
        OutputFormat::Json => print_json(&CutoffOutput {
            parameters: params,
            epsilon,
            safety_cutoff: cutoff,
        }),
        OutputFormat::Text => {
            println!("Safety cutoff (epsilon <= {epsilon:e}): {cutoff:.2}% adversarial stake");
            Ok(())
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SafetyOutput {
    #[serde(flatten)]
    report: SafetyReport,
    production_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    production_blocker: Option<String>,
}

pub(crate) fn run_safety(
    source: &ParamsSource,
    total_nodes: usize,
    format: OutputFormat,
) -> miette::Result<()> {
    let params = load_params(source)?;
    let report = analyze_safety(&params, total_nodes);
    let blocker = validate_for_production(&params, total_nodes)
        .err()
        .map(|e| e.to_string());

    match format {
        OutputFormat::Json => print_json(&SafetyOutput {
            report,
            production_ready: blocker.is_none(),
            production_blocker: blocker,
        }),
        OutputFormat::Text => {
            println!("Safety level: {}", report.level);
            for (title, items) in [
                ("Issues", &report.issues),
                ("Warnings", &report.warnings),
                ("Suggestions", &report.suggestions),
            ] {
                if !items.is_empty() {
                    println!("\n{title}:");
                    for item in items {
                        println!("  - {item}");
                    }
                }
            }
            println!("\n{}.", report.explanation);
            match blocker {
                None => println!("\nProduction ready: yes"),
                Some(reason) => println!("\nProduction ready: no ({reason})"),
            }
            Ok(())
        }
    }
}
