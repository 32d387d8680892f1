//! `reconcile compare <template> <target>`: run the reconciliation comparator.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use reconcile_core::{compare_trees, CompareOptions, ComparisonResult, Difference};

use super::super::ModeArg;
use super::{exclusion_policy, read_tree};

/// Arguments for `reconcile compare`.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Template-inputs document (YAML or JSON).
    pub template: PathBuf,

    /// Pipeline or stage document (YAML or JSON).
    pub target: PathBuf,

    /// Comparison mode: pipeline | stage.
    #[arg(long, short = 'm', default_value = "pipeline")]
    pub mode: ModeArg,

    /// The target was just refreshed; do not report template inputs it lacks.
    #[arg(long)]
    pub updated: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Exit with an error when the target is out of sync.
    #[arg(long)]
    pub check: bool,

    /// Configuration file (defaults to ./.reconcile.yaml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Tabled)]
struct DifferenceRow {
    #[tabled(rename = "finding")]
    finding: String,
    #[tabled(rename = "path")]
    path: String,
}

impl CompareArgs {
    pub fn run(self) -> Result<()> {
        let policy = exclusion_policy(self.config.as_deref())?;
        let template = read_tree(&self.template, "template inputs")?;
        let target = read_tree(&self.target, "target")?;

        let options = CompareOptions::for_mode(self.mode.0)
            .updated(self.updated)
            .with_exclusion(policy);
        let result = compare_trees(&template, &target, &options);

        if self.json {
            println!(
                "{}",
                result.to_json().context("failed to serialize comparison JSON")?
            );
        } else {
            print_result(&result, &self.mode);
        }

        if self.check && result.has_difference {
            bail!(
                "{} is out of sync with its template ({} finding(s))",
                self.target.display(),
                result.differences.len()
            );
        }
        Ok(())
    }
}

fn print_result(result: &ComparisonResult, mode: &ModeArg) {
    if result.is_in_sync() {
        println!("{} {mode} is in sync with its template", "✓".green().bold());
        return;
    }

    println!(
        "{} {mode} is out of sync with its template; reconcile to update it",
        "!".yellow().bold()
    );
    let rows: Vec<DifferenceRow> = result
        .differences
        .iter()
        .map(|diff| DifferenceRow {
            finding: finding_label(diff).to_string(),
            path: diff.path().to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn finding_label(diff: &Difference) -> &'static str {
    match diff {
        Difference::MissingInTarget { .. } => "MISSING IN TARGET",
        Difference::UndeclaredInTemplate { .. } => "NOT IN TEMPLATE",
    }
}
