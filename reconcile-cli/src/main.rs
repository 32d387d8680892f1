//! Reconcile: check template-linked pipelines and stages for drift.
//!
//! # Usage
//!
//! ```text
//! reconcile compare <template> <target> [--mode pipeline|stage] [--updated] [--json] [--check]
//! reconcile paths <file> [--runtime-only] [--root pipeline|stage|template-inputs]
//! reconcile diff <template> <target> [--mode pipeline|stage]
//! ```
//!
//! Every command accepts `--config <file>`; otherwise `.reconcile.yaml` in the
//! current directory is used when present.

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{compare::CompareArgs, diff::DiffArgs, paths::PathsArgs};
use reconcile_core::{ComparisonMode, TreeRoot};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "reconcile",
    version,
    about = "Detect drift between templates and the pipelines or stages linked to them",
    long_about = None,
)]
struct Cli {
    /// Log comparison details to stderr (overridden by RUST_LOG).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare template inputs against a pipeline or stage.
    Compare(CompareArgs),

    /// List the paths of a pipeline, stage, or template-inputs document.
    Paths(PathsArgs),

    /// Show a unified diff of runtime-input paths.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Shared argument wrappers, parsed from CLI strings into core types
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `ComparisonMode` from CLI args.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeArg(pub ComparisonMode);

impl FromStr for ModeArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pipeline" => Ok(Self(ComparisonMode::Pipeline)),
            "stage" => Ok(Self(ComparisonMode::Stage)),
            other => Err(format!(
                "unknown mode '{other}'; expected: pipeline, stage"
            )),
        }
    }
}

impl fmt::Display for ModeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Thin wrapper so clap can parse `TreeRoot` from CLI args.
#[derive(Debug, Clone, Copy)]
pub struct RootArg(pub TreeRoot);

impl Default for RootArg {
    fn default() -> Self {
        Self(TreeRoot::TemplateInputs)
    }
}

impl FromStr for RootArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pipeline" => Ok(Self(TreeRoot::Pipeline)),
            "stage" => Ok(Self(TreeRoot::Stage)),
            "template-inputs" | "template_inputs" => Ok(Self(TreeRoot::TemplateInputs)),
            other => Err(format!(
                "unknown root '{other}'; expected: pipeline, stage, template-inputs"
            )),
        }
    }
}

impl fmt::Display for RootArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Compare(args) => args.run(),
        Commands::Paths(args) => args.run(),
        Commands::Diff(args) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
