//! `reconcile diff <template> <target>`: unified diff of runtime-input paths.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use reconcile_core::report::runtime_path_diff;

use super::super::ModeArg;
use super::{exclusion_policy, read_tree};

/// Arguments for `reconcile diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Template-inputs document (YAML or JSON).
    pub template: PathBuf,

    /// Pipeline or stage document (YAML or JSON).
    pub target: PathBuf,

    /// Comparison mode: pipeline | stage.
    #[arg(long, short = 'm', default_value = "pipeline")]
    pub mode: ModeArg,

    /// Configuration file (defaults to ./.reconcile.yaml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let policy = exclusion_policy(self.config.as_deref())?;
        let template = read_tree(&self.template, "template inputs")?;
        let target = read_tree(&self.target, "target")?;

        let diff = runtime_path_diff(&template, &target, self.mode.0, &policy);
        if diff.is_empty() {
            println!("No differences for '{}'.", self.target.display());
            return Ok(());
        }

        print!("{diff}");
        if !diff.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
