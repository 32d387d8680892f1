//! Optional YAML configuration for the exclusion policy.
//!
//! ```yaml
//! # .reconcile.yaml
//! excluded_paths:          # replaces the defaults when present
//!   - spec.service
//!   - spec.environment
//! extra_excluded_paths:    # appended to excluded_paths
//!   - spec.infrastructure
//! ```
//!
//! A missing file yields [`ReconcileConfig::default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ReconcileError};
use crate::exclusion::{ExclusionPolicy, DEFAULT_EXCLUDED_PATHS};

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = ".reconcile.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub excluded_paths: Vec<String>,
    pub extra_excluded_paths: Vec<String>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            excluded_paths: DEFAULT_EXCLUDED_PATHS.iter().map(|s| s.to_string()).collect(),
            extra_excluded_paths: Vec::new(),
        }
    }
}

impl ReconcileConfig {
    pub fn exclusion_policy(&self) -> ExclusionPolicy {
        ExclusionPolicy::new(
            self.excluded_paths
                .iter()
                .chain(&self.extra_excluded_paths)
                .cloned(),
        )
    }
}

/// `<dir>/.reconcile.yaml`, pure, no I/O.
pub fn config_path_at(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from an explicit file path.
///
/// Missing or blank files fall back to defaults. An empty fragment is
/// rejected since it would match every path.
pub fn load_config_at(path: &Path) -> Result<ReconcileConfig, ReconcileError> {
    if !path.exists() {
        return Ok(ReconcileConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(ReconcileConfig::default());
    }
    let config: ReconcileConfig =
        serde_yaml::from_str(&contents).map_err(|e| ReconcileError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let all = config.excluded_paths.iter().chain(&config.extra_excluded_paths);
    if all.clone().any(|f| f.trim().is_empty()) {
        return Err(ReconcileError::InvalidConfig {
            path: path.to_path_buf(),
            message: "excluded path fragments must not be empty".to_string(),
        });
    }
    tracing::debug!(
        path = %path.display(),
        fragments = all.count(),
        "loaded reconcile config"
    );
    Ok(config)
}

/// Load `.reconcile.yaml` from `dir`.
pub fn load_config(dir: &Path) -> Result<ReconcileConfig, ReconcileError> {
    load_config_at(&config_path_at(dir))
}
