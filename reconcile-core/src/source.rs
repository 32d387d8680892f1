//! Loading reconciliation trees from YAML (or JSON) text and files.
//!
//! YAML is a superset of JSON, so both go through `serde_yaml`.

use std::path::Path;

use serde_yaml::Value;

use crate::error::{io_err, ReconcileError};
use crate::tree::Node;

/// Parse YAML text into a tree. An empty document becomes an empty mapping.
pub fn parse_tree(text: &str) -> Result<Node, ReconcileError> {
    if text.trim().is_empty() {
        return Ok(Node::empty());
    }
    let value: Value = serde_yaml::from_str(text)?;
    Ok(Node::from(&value))
}

/// Read and parse a YAML or JSON file into a tree.
///
/// Returns `ReconcileError::Io` if the file cannot be read and
/// `ReconcileError::Parse` (with path) if it is malformed.
pub fn load_tree(path: &Path) -> Result<Node, ReconcileError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(Node::empty());
    }
    let value: Value = serde_yaml::from_str(&contents).map_err(|e| ReconcileError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "loaded tree");
    Ok(Node::from(&value))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn parses_yaml_text() {
        let tree = parse_tree("spec:\n  timeout: <+input>\n").expect("parse");
        assert!(tree.resolve("spec.timeout").expect("leaf").is_runtime_input());
    }

    #[test]
    fn empty_text_is_empty_map() {
        assert_eq!(parse_tree("  \n").expect("parse"), Node::empty());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = parse_tree("a: [1, 2").expect_err("should fail");
        assert!(matches!(err, ReconcileError::Yaml(_)));
    }

    #[test]
    fn load_reads_json_files() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("stage.json");
        fs::write(&path, r#"{"spec": {"foo": "<+input>"}}"#).expect("write");
        let tree = load_tree(&path).expect("load");
        assert!(tree.resolve("spec.foo").expect("leaf").is_runtime_input());
    }

    #[test]
    fn load_reports_path_on_parse_failure() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "a: [unclosed").expect("write");
        match load_tree(&path) {
            Err(ReconcileError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().expect("tempdir");
        let err = load_tree(&dir.path().join("nope.yaml")).expect_err("missing");
        assert!(matches!(err, ReconcileError::Io { .. }));
    }
}
