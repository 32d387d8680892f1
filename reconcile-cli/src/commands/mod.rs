//! Subcommand implementations.

pub mod compare;
pub mod diff;
pub mod paths;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use reconcile_core::{load_config, load_config_at, load_tree, ExclusionPolicy, Node};

/// Resolve the exclusion policy from `--config` or `./.reconcile.yaml`.
pub(crate) fn exclusion_policy(config: Option<&Path>) -> Result<ExclusionPolicy> {
    let config = match config {
        Some(path) if !path.exists() => bail!("config file '{}' not found", path.display()),
        Some(path) => load_config_at(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => {
            let cwd: PathBuf =
                std::env::current_dir().context("could not determine current directory")?;
            load_config(&cwd).context("failed to load .reconcile.yaml")?
        }
    };
    Ok(config.exclusion_policy())
}

pub(crate) fn read_tree(path: &Path, what: &str) -> Result<Node> {
    load_tree(path).with_context(|| format!("failed to load {what} '{}'", path.display()))
}
