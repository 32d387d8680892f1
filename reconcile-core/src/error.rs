//! Error types for reconcile-core.
//!
//! The comparator itself never fails; only loading trees and configuration
//! from text or disk can.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading trees or configuration.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Underlying I/O failure, with the path that was being read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error for in-memory text (no file involved).
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, includes the file path.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON serialization error (comparison reports).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file parsed but holds an unusable value.
    #[error("invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },
}

/// Convenience constructor for [`ReconcileError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ReconcileError {
    ReconcileError::Io {
        path: path.into(),
        source,
    }
}
