// Command handlers that produce parameter sets: preset, build, recommend,
// optimal, validate, and guide.

use std::path::{Path, PathBuf};
use std::time::Duration;

use miette::{IntoDiagnostic, WrapErr};
use serde::Serialize;
use snowtune_engine::recommend_parameters;
use snowtune_params::{
    calculate_optimal_parameters, parameter_guides, preset, Builder, NetworkCharacteristics,
    Objective,
};
use tracing::info;

use super::helpers::{print_json, read_params_file};
use crate::cli::OutputFormat;

pub(crate) struct BuildArgs {
    pub(crate) preset: Option<String>,
    pub(crate) nodes: Option<usize>,
    pub(crate) k: Option<usize>,
    pub(crate) alpha_pref: Option<usize>,
    pub(crate) alpha_conf: Option<usize>,
    pub(crate) beta: Option<usize>,
    pub(crate) concurrent: Option<usize>,
    pub(crate) target_finality_ms: Option<u64>,
    pub(crate) network_latency: u64,
    pub(crate) optimize: Option<String>,
    pub(crate) out: Option<PathBuf>,
}

pub(crate) fn run_preset(name: &str, format: OutputFormat) -> miette::Result<()> {
    let params = preset(name)?;
    match format {
        OutputFormat::Json => print_json(&params),
        OutputFormat::Text => {
            println!("{}", params.summary());
            Ok(())
        }
    }
}

/// Applies the flags in a fixed order: preset, node count, explicit fields,
/// finality target, then the objective.
pub(crate) fn run_build(args: BuildArgs, format: OutputFormat) -> miette::Result<()> {
    let mut builder = Builder::new();
    if let Some(name) = &args.preset {
        builder = builder.from_preset(name)?;
    }
    if let Some(nodes) = args.nodes {
        builder = builder.for_node_count(nodes);
    }
    if let Some(k) = args.k {
        builder = builder.with_sample_size(k);
    }
    if args.alpha_pref.is_some() || args.alpha_conf.is_some() {
        let current = *builder.parameters();
        builder = builder.with_quorums(
            args.alpha_pref.unwrap_or(current.alpha_preference),
            args.alpha_conf.unwrap_or(current.alpha_confidence),
        );
    }
    if let Some(beta) = args.beta {
        builder = builder.with_beta(beta);
    }
    if let Some(concurrent) = args.concurrent {
        builder = builder.with_concurrent_repolls(concurrent);
    }
    if let Some(target) = args.target_finality_ms {
        builder = builder.with_target_finality(Duration::from_millis(target), args.network_latency);
    }
    if let Some(objective) = &args.optimize {
        builder = builder.optimize_for(objective.parse::<Objective>()?);
    }
    let params = builder.build()?;

    if let Some(path) = &args.out {
        write_file(path, &params.to_json()?)?;
        info!(path = %path.display(), "wrote parameters");
    }
    match format {
        OutputFormat::Json => print_json(&params),
        OutputFormat::Text => {
            println!("{}", params.summary());
            Ok(())
        }
    }
}

pub(crate) fn run_recommend(
    nodes: usize,
    target_finality_ms: Option<u64>,
    network_latency: u64,
    format: OutputFormat,
) -> miette::Result<()> {
    let rec = recommend_parameters(
        nodes,
        target_finality_ms.map(Duration::from_millis),
        network_latency,
    )?;
    match format {
        OutputFormat::Json => print_json(&rec),
        OutputFormat::Text => {
            println!("{}", rec.parameters.summary());
            println!("\nSafety level: {}", rec.safety.level);
            for s in &rec.safety.suggestions {
                println!("  - {s}");
            }
            Ok(())
        }
    }
}

pub(crate) fn run_optimal(nc: NetworkCharacteristics, format: OutputFormat) -> miette::Result<()> {
    let result = calculate_optimal_parameters(&nc)?;
    match format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Text => {
            println!("{}", result.parameters.summary());
            println!("\nOptimization reasoning:");
            for line in &result.reasoning {
                println!("  - {line}");
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ValidationOutput<'a> {
    file: &'a str,
    valid: bool,
}

pub(crate) fn run_validate(file: &Path, format: OutputFormat) -> miette::Result<()> {
    let params = read_params_file(file)?;
    match format {
        OutputFormat::Json => print_json(&ValidationOutput {
            file: &file.display().to_string(),
            valid: true,
        }),
        OutputFormat::Text => {
            println!("{} is valid (k={}, beta={})", file.display(), params.k, params.beta);
            Ok(())
        }
    }
}

pub(crate) fn run_guide(format: OutputFormat) -> miette::Result<()> {
    let guides = parameter_guides();
    match format {
        OutputFormat::Json => print_json(guides),
        OutputFormat::Text => {
            for g in guides {
                println!("{}", g.parameter);
                println!("  {}", g.description);
                println!("  Formula:   {}", g.formula);
                println!("  Range:     {} .. {}", g.min_value, g.max_value);
                println!("  Typical:   {}", g.typical);
                println!("  Impact:    {}", g.impact);
                println!("  Trade-offs: {}\n", g.trade_offs);
            }
            Ok(())
        }
    }
}

fn write_file(path: &Path, contents: &str) -> miette::Result<()> {
    std::fs::write(path, contents)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to write {}", path.display()))
}
