//! Path enumeration, runtime-input filtering, and nested-path reduction.
//!
//! Paths join mapping keys with `.` (no leading dot at the root) and append
//! sequence indices as `[i]`. Comparison is by path presence only, never by
//! value equality.

use crate::exclusion::ExclusionPolicy;
use crate::tree::Node;

/// Enumerate every addressable path below the root, depth first.
///
/// Composite nodes contribute their own path before their children's, so
/// `a.b` and `a.b.c` both appear for a leaf `c`. A scalar root yields the
/// single empty path.
pub fn enumerate_paths(tree: &Node) -> Vec<String> {
    let mut paths = Vec::new();
    match tree {
        Node::Leaf(_) => paths.push(String::new()),
        _ => walk(tree, "", &mut paths),
    }
    paths
}

fn walk(node: &Node, parent: &str, out: &mut Vec<String>) {
    match node {
        Node::Map(entries) => {
            for (key, child) in entries {
                let path = if parent.is_empty() {
                    key.clone()
                } else {
                    format!("{parent}.{key}")
                };
                out.push(path.clone());
                walk(child, &path, out);
            }
        }
        Node::Seq(items) => {
            for (idx, child) in items.iter().enumerate() {
                let path = format!("{parent}[{idx}]");
                out.push(path.clone());
                walk(child, &path, out);
            }
        }
        Node::Leaf(_) => {}
    }
}

/// Keep the paths whose node at `prefix + path` is a runtime-input leaf and
/// whose `prefix + path` is not excluded by `policy`.
///
/// The empty path never addresses a field, so a scalar root is not a runtime
/// input. Returned paths are the ones passed in, i.e. without `prefix`.
pub fn runtime_input_paths(
    tree: &Node,
    paths: &[String],
    prefix: &str,
    policy: &ExclusionPolicy,
) -> Vec<String> {
    paths
        .iter()
        .filter(|path| {
            let full = format!("{prefix}{path}");
            !full.is_empty()
                && !policy.excludes(&full)
                && tree.resolve(&full).is_some_and(Node::is_runtime_input)
        })
        .cloned()
        .collect()
}

/// Drop candidates that are strict descendants of any reference path.
///
/// A candidate equal to a reference is kept.
pub fn without_nested(candidates: &[String], references: &[String]) -> Vec<String> {
    candidates
        .iter()
        .filter(|candidate| !references.iter().any(|r| is_descendant(candidate, r)))
        .cloned()
        .collect()
}

/// `true` if `path` lies strictly below `ancestor` (`a.b.c` or `a.b[0]` under `a.b`).
///
/// The empty path is nobody's ancestor.
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    if ancestor.is_empty() {
        return false;
    }
    match path.strip_prefix(ancestor) {
        Some(rest) => rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

/// Enumerate `target` and strip `remove_prefix` from every path that carries it.
pub fn stripped_paths(target: &Node, remove_prefix: &str) -> Vec<String> {
    enumerate_paths(target)
        .into_iter()
        .map(|path| match path.strip_prefix(remove_prefix) {
            Some(rest) => rest.to_owned(),
            None => path,
        })
        .collect()
}
