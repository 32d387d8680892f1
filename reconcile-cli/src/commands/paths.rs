//! `reconcile paths <file>`: list enumerated paths of a document.
//!
//! With `--runtime-only`, each runtime input whose marker carries modifiers is
//! followed by a short summary such as `default=10m allowed=5m,10m`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use reconcile_core::{paths::enumerate_paths, report::runtime_inputs, RuntimeInput};

use super::super::RootArg;
use super::{exclusion_policy, read_tree};

/// Arguments for `reconcile paths`.
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Document to inspect (YAML or JSON).
    pub file: PathBuf,

    /// Only list runtime-input paths, in template path space.
    #[arg(long)]
    pub runtime_only: bool,

    /// Root convention of the document: pipeline | stage | template-inputs.
    #[arg(long, default_value = "template-inputs")]
    pub root: RootArg,

    /// Configuration file (defaults to ./.reconcile.yaml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl PathsArgs {
    pub fn run(self) -> Result<()> {
        let tree = read_tree(&self.file, "document")?;
        if !self.runtime_only {
            for path in enumerate_paths(&tree) {
                println!("{path}");
            }
            return Ok(());
        }

        let policy = exclusion_policy(self.config.as_deref())?;
        for (path, input) in runtime_inputs(&tree, self.root.0, &policy) {
            match describe_modifiers(input) {
                Some(summary) => println!("{path}  {summary}"),
                None => println!("{path}"),
            }
        }
        Ok(())
    }
}

/// `default=.. allowed=.. execution-input`, or `None` for a bare marker.
fn describe_modifiers(input: &RuntimeInput) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(value) = input.default_value() {
        parts.push(format!("default={value}"));
    }
    if let Some(values) = input.allowed_values() {
        parts.push(format!("allowed={}", values.join(",")));
    }
    if input.is_execution_input() {
        parts.push("execution-input".to_owned());
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}
