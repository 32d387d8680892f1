//! Human-readable drift listings.
//!
//! [`runtime_paths`] lists the runtime-input surface of a tree in template
//! path space; [`runtime_path_diff`] renders a unified diff of the template's
//! surface against the target's. Neither affects [`crate::compare_trees`].

use std::collections::HashSet;

use similar::TextDiff;

use crate::compare::{ComparisonMode, TreeRoot};
use crate::exclusion::ExclusionPolicy;
use crate::marker::RuntimeInput;
use crate::paths::{runtime_input_paths, stripped_paths};
use crate::tree::Node;

/// Runtime-input paths of `tree`, with the template-inputs prefix of `root` stripped.
pub fn runtime_paths(tree: &Node, root: TreeRoot, policy: &ExclusionPolicy) -> Vec<String> {
    let prefix = root.template_inputs_prefix();
    let paths = stripped_paths(tree, prefix);
    let mut seen = HashSet::new();
    runtime_input_paths(tree, &paths, prefix, policy)
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Runtime-input paths of `tree` paired with their parsed markers.
pub fn runtime_inputs<'a>(
    tree: &'a Node,
    root: TreeRoot,
    policy: &ExclusionPolicy,
) -> Vec<(String, &'a RuntimeInput)> {
    let prefix = root.template_inputs_prefix();
    runtime_paths(tree, root, policy)
        .into_iter()
        .filter_map(|path| {
            let input = tree
                .resolve(&format!("{prefix}{path}"))
                .and_then(Node::runtime_input)?;
            Some((path, input))
        })
        .collect()
}

/// Unified diff of template runtime inputs (`a/`) against target runtime inputs (`b/`).
///
/// Returns an empty string when both surfaces list the same paths.
pub fn runtime_path_diff(
    template_inputs: &Node,
    target: &Node,
    mode: ComparisonMode,
    policy: &ExclusionPolicy,
) -> String {
    let old = to_lines(&runtime_paths(template_inputs, TreeRoot::TemplateInputs, policy));
    let new = to_lines(&runtime_paths(target, mode.target_root(), policy));
    if old == new {
        return String::new();
    }
    TextDiff::from_lines(&old, &new)
        .unified_diff()
        .header("a/template-inputs", &format!("b/{mode}"))
        .context_radius(3)
        .to_string()
}

fn to_lines(paths: &[String]) -> String {
    let mut out = String::new();
    for path in paths {
        out.push_str(path);
        out.push('\n');
    }
    out
}
