//! CLI argument definitions: top-level `Cli` struct and `Commands` enum.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub(crate) const CLI_LONG_ABOUT: &str =
    "Sizes and checks Snowball/Avalanche-style consensus parameters.\n\n\
    Typical path:\n  \
    1. snowtune recommend --nodes 21 --target-finality-ms 1000\n  \
    2. snowtune build --nodes 21 --optimize latency --out params.json\n  \
    3. snowtune check --params params.json --total-nodes 21\n\n\
    Every command accepts --format json for machine-readable output.";

#[derive(Parser)]
#[command(name = "snowtune")]
#[command(about = "Parameter sizing and safety analysis for sampling consensus")]
#[command(long_about = CLI_LONG_ABOUT)]
#[command(version)]
pub(crate) struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Where a command reads its parameters from.
#[derive(Args, Debug)]
pub(crate) struct ParamsSource {
    /// Named preset: mainnet, testnet, local, benchmark
    #[arg(long, conflicts_with = "params")]
    pub(crate) preset: Option<String>,

    /// JSON parameter file
    #[arg(long)]
    pub(crate) params: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print a named preset
    Preset {
        /// Preset name
        name: String,
    },

    /// Derive parameters with the builder
    Build {
        /// Start from a preset instead of the builder defaults
        #[arg(long)]
        preset: Option<String>,

        /// Size sample, quorums, and beta for this many validators
        #[arg(long)]
        nodes: Option<usize>,

        /// Sample size
        #[arg(long)]
        k: Option<usize>,

        /// Preference quorum
        #[arg(long)]
        alpha_pref: Option<usize>,

        /// Confidence quorum
        #[arg(long)]
        alpha_conf: Option<usize>,

        /// Consecutive confidence rounds
        #[arg(long)]
        beta: Option<usize>,

        /// Pipeline depth
        #[arg(long)]
        concurrent: Option<usize>,

        /// Fit beta into this finality budget
        #[arg(long)]
        target_finality_ms: Option<u64>,

        /// Round latency used with --target-finality-ms
        #[arg(long, default_value_t = 50)]
        network_latency: u64,

        /// Objective layered on top: latency | security | throughput
        #[arg(long)]
        optimize: Option<String>,

        /// Also write the parameters as JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Full checker report
    Check {
        #[command(flatten)]
        source: ParamsSource,

        /// Validators in the network (defaults to k)
        #[arg(long)]
        total_nodes: Option<usize>,

        /// Round latency in milliseconds
        #[arg(long, default_value_t = 50)]
        network_latency: u64,

        /// Target safety failure probability
        #[arg(long, default_value_t = 1e-9)]
        epsilon: f64,
    },

    /// Failure probabilities at one adversarial stake
    Probability {
        #[command(flatten)]
        source: ParamsSource,

        /// Adversarial stake as a fraction in [0, 1]
        #[arg(long)]
        ratio: f64,
    },

    /// Largest tolerable adversarial stake
    Cutoff {
        #[command(flatten)]
        source: ParamsSource,

        /// Target safety failure probability
        #[arg(long, default_value_t = 1e-9)]
        epsilon: f64,
    },

    /// Graded safety assessment and production verdict
    Safety {
        #[command(flatten)]
        source: ParamsSource,

        /// Validators in the network
        #[arg(long)]
        total_nodes: usize,
    },

    /// Recommend parameters for a network size
    Recommend {
        /// Validators in the network
        #[arg(long)]
        nodes: usize,

        /// Finality budget in milliseconds
        #[arg(long)]
        target_finality_ms: Option<u64>,

        /// Round latency in milliseconds
        #[arg(long, default_value_t = 50)]
        network_latency: u64,
    },

    /// Derive parameters from network characteristics
    Optimal {
        /// Validators in the network
        #[arg(long)]
        nodes: usize,

        /// Expected fraction of faulty nodes in [0, 1)
        #[arg(long, default_value_t = 0.2)]
        failure_rate: f64,

        /// Round latency in milliseconds
        #[arg(long, default_value_t = 50)]
        network_latency: u64,

        /// Finality budget in milliseconds
        #[arg(long, default_value_t = 1000)]
        target_finality_ms: u64,

        /// Throughput target in transactions per second
        #[arg(long, default_value_t = 100)]
        target_tps: u64,

        /// Size for a production network
        #[arg(long)]
        production: bool,
    },

    /// Decode and validate a JSON parameter file
    Validate {
        /// Parameter file
        file: PathBuf,
    },

    /// Describe every parameter
    Guide,
}
