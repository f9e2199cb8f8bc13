use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "BinderTriage CLI - Filter, rank, and diversity-select designed biomolecule binders into a high-quality shortlist.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel gate evaluation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full triage pipeline: filter cascade, fallback escalation,
    /// worst-metric ranking, and diversity selection.
    Screen(ScreenArgs),
}

/// Arguments for the `screen` subcommand.
#[derive(Args, Debug)]
pub struct ScreenArgs {
    // --- Core Arguments ---
    /// Path to the input candidate file (JSON array of candidate records).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output shortlist file (JSON).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to the configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write screening statistics (counts and the relaxation audit trail)
    /// to this JSON file.
    #[arg(long, value_name = "PATH")]
    pub stats: Option<PathBuf>,

    /// Write a flat CSV table of the shortlist to this file.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    // --- Screening Overrides ---
    /// Override the minimum candidate yield from the config file.
    #[arg(short, long, value_name = "INT")]
    pub min_candidates: Option<usize>,

    /// Override the maximum threshold relaxation fraction (e.g. 0.1 for 10%).
    #[arg(long, value_name = "FLOAT")]
    pub max_relaxation: Option<f64>,

    /// Treat a post-escalation shortfall as a hard error.
    #[arg(long)]
    pub fail_on_shortfall: bool,

    // --- Selection Overrides ---
    /// Override the shortlist size from the config file.
    #[arg(short, long, value_name = "INT")]
    pub target_count: Option<usize>,

    /// Override the diversity trade-off alpha from the config file.
    #[arg(long, value_name = "FLOAT")]
    pub diversity_alpha: Option<f64>,
}
