#![doc = include_str!("../README.md")]

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{analysis, params};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Commands::Preset { name } => params::run_preset(&name, format),
        Commands::Build {
            preset,
            nodes,
            k,
            alpha_pref,
            alpha_conf,
            beta,
            concurrent,
            target_finality_ms,
            network_latency,
            optimize,
            out,
        } => params::run_build(
            params::BuildArgs {
                preset,
                nodes,
                k,
                alpha_pref,
                alpha_conf,
                beta,
                concurrent,
                target_finality_ms,
                network_latency,
                optimize,
                out,
            },
            format,
        ),
        Commands::Check {
            source,
            total_nodes,
            network_latency,
            epsilon,
        } => analysis::run_check(&source, total_nodes, network_latency, epsilon, format),
        Commands::Probability { source, ratio } => {
            analysis::run_probability(&source, ratio, format)
        }
        Commands::Cutoff { source, epsilon } => analysis::run_cutoff(&source, epsilon, format),
        Commands::Safety {
            source,
            total_nodes,
        } => analysis::run_safety(&source, total_nodes, format),
        Commands::Recommend {
            nodes,
            target_finality_ms,
            network_latency,
        } => params::run_recommend(nodes, target_finality_ms, network_latency, format),
        Commands::Optimal {
            nodes,
            failure_rate,
            network_latency,
            target_finality_ms,
            target_tps,
            production,
        } => params::run_optimal(
            snowtune_params::NetworkCharacteristics {
                total_nodes: nodes,
                expected_failure_rate: failure_rate,
                network_latency_ms: network_latency,
                target_finality_ms,
                target_throughput_tps: target_tps,
                is_production: production,
            },
            format,
        ),
        Commands::Validate { file } => params::run_validate(&file, format),
        Commands::Guide => params::run_guide(format),
    }
}
