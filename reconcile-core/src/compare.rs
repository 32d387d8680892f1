//! Template/pipeline reconciliation comparator.
//!
//! Decides whether a template's runtime-input surface still matches the
//! fields present in a concrete pipeline or stage. Two directions are checked:
//!
//! 1. every template runtime input must still have a slot in the target
//!    (skipped right after an update, when converting an input to a fixed
//!    value legitimately deletes the key);
//! 2. every target runtime input inside the managed region must be declared
//!    somewhere in the template, unless it sits below a template runtime input.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::exclusion::ExclusionPolicy;
use crate::paths::{enumerate_paths, runtime_input_paths, stripped_paths, without_nested};
use crate::tree::Node;

/// Root convention of a tree handed to the comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeRoot {
    /// A whole pipeline linked to a pipeline template.
    Pipeline,
    /// A single stage linked to a stage template.
    Stage,
    /// The template's own runtime-input document.
    TemplateInputs,
}

impl TreeRoot {
    /// Where the template inputs live inside a tree of this root.
    pub const fn template_inputs_prefix(self) -> &'static str {
        match self {
            TreeRoot::Pipeline => "template.templateInputs.",
            TreeRoot::Stage => "stage.template.templateInputs.",
            TreeRoot::TemplateInputs => "",
        }
    }
}

impl fmt::Display for TreeRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeRoot::Pipeline => write!(f, "pipeline"),
            TreeRoot::Stage => write!(f, "stage"),
            TreeRoot::TemplateInputs => write!(f, "template-inputs"),
        }
    }
}

/// Which pair of trees is being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComparisonMode {
    /// Pipeline template inputs against a pipeline.
    #[default]
    Pipeline,
    /// Stage template inputs against a stage.
    Stage,
}

impl ComparisonMode {
    pub const fn target_root(self) -> TreeRoot {
        match self {
            ComparisonMode::Pipeline => TreeRoot::Pipeline,
            ComparisonMode::Stage => TreeRoot::Stage,
        }
    }

    /// Prefix stripped from target paths to land in template path space.
    pub const fn remove_prefix(self) -> &'static str {
        self.target_root().template_inputs_prefix()
    }

    /// Only target runtime inputs under this prefix can report an undeclared input.
    pub const fn process_only_prefix(self) -> &'static str {
        match self {
            ComparisonMode::Pipeline => "stages[",
            ComparisonMode::Stage => "spec.",
        }
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.target_root().fmt(f)
    }
}

/// Knobs for [`compare_trees`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    pub remove_prefix: String,
    pub process_only_prefix: String,
    /// Skip the "template input missing from target" direction.
    pub is_updated: bool,
    pub exclusion: ExclusionPolicy,
}

impl CompareOptions {
    pub fn for_mode(mode: ComparisonMode) -> Self {
        Self {
            remove_prefix: mode.remove_prefix().to_owned(),
            process_only_prefix: mode.process_only_prefix().to_owned(),
            is_updated: false,
            exclusion: ExclusionPolicy::default(),
        }
    }

    pub fn updated(mut self, is_updated: bool) -> Self {
        self.is_updated = is_updated;
        self
    }

    pub fn with_exclusion(mut self, exclusion: ExclusionPolicy) -> Self {
        self.exclusion = exclusion;
        self
    }
}

/// A single reason two trees are out of sync.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Difference {
    /// The template declares a runtime input the target has no field for.
    MissingInTarget { path: String },
    /// The target has a runtime input the template does not declare.
    UndeclaredInTemplate { path: String },
}

impl Difference {
    pub fn path(&self) -> &str {
        match self {
            Difference::MissingInTarget { path } | Difference::UndeclaredInTemplate { path } => {
                path
            }
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::MissingInTarget { path } => {
                write!(f, "template runtime input `{path}` is missing from target")
            }
            Difference::UndeclaredInTemplate { path } => {
                write!(f, "target runtime input `{path}` is not declared by template")
            }
        }
    }
}

/// Outcome of one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub has_difference: bool,
    pub differences: Vec<Difference>,
}

impl ComparisonResult {
    fn from_differences(differences: Vec<Difference>) -> Self {
        Self {
            has_difference: !differences.is_empty(),
            differences,
        }
    }

    pub fn is_in_sync(&self) -> bool {
        !self.has_difference
    }

    pub fn to_json(&self) -> Result<String, crate::ReconcileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compare a template-inputs tree against a target tree.
pub fn compare_trees(
    template_inputs: &Node,
    target: &Node,
    options: &CompareOptions,
) -> ComparisonResult {
    let template_paths = enumerate_paths(template_inputs);
    let template_runtime =
        runtime_input_paths(template_inputs, &template_paths, "", &options.exclusion);

    let target_paths = stripped_paths(target, &options.remove_prefix);
    let target_runtime = runtime_input_paths(
        target,
        &target_paths,
        &options.remove_prefix,
        &options.exclusion,
    );
    let target_runtime = without_nested(&target_runtime, &template_runtime);

    let template_set: HashSet<&str> = template_paths.iter().map(String::as_str).collect();
    let target_set: HashSet<&str> = target_paths.iter().map(String::as_str).collect();

    let mut differences = Vec::new();
    let mut seen = HashSet::new();

    if !options.is_updated {
        for path in &template_runtime {
            if !target_set.contains(path.as_str()) {
                let diff = Difference::MissingInTarget { path: path.clone() };
                if seen.insert(diff.clone()) {
                    tracing::debug!(path = %path, "template runtime input missing from target");
                    differences.push(diff);
                }
            }
        }
    }

    for path in target_runtime
        .iter()
        .filter(|p| p.starts_with(options.process_only_prefix.as_str()))
    {
        if !template_set.contains(path.as_str()) {
            let diff = Difference::UndeclaredInTemplate { path: path.clone() };
            if seen.insert(diff.clone()) {
                tracing::debug!(path = %path, "target runtime input not declared by template");
                differences.push(diff);
            }
        }
    }

    tracing::debug!(
        template_paths = template_paths.len(),
        template_runtime = template_runtime.len(),
        target_paths = target_paths.len(),
        target_runtime = target_runtime.len(),
        differences = differences.len(),
        is_updated = options.is_updated,
        "compared template inputs"
    );

    ComparisonResult::from_differences(differences)
}

/// Compare using the fixed prefixes of `mode` and the default exclusion policy.
pub fn compare(
    mode: ComparisonMode,
    template_inputs: &Node,
    target: &Node,
    is_updated: bool,
) -> ComparisonResult {
    let options = CompareOptions::for_mode(mode).updated(is_updated);
    compare_trees(template_inputs, target, &options)
}

/// Pipeline template inputs against a whole pipeline.
pub fn compare_template_and_pipeline(
    template_inputs: &Node,
    pipeline: &Node,
    is_updated: bool,
) -> ComparisonResult {
    compare(ComparisonMode::Pipeline, template_inputs, pipeline, is_updated)
}

/// Stage template inputs against a single stage.
pub fn compare_stage_template_and_stage(
    template_inputs: &Node,
    stage: &Node,
    is_updated: bool,
) -> ComparisonResult {
    compare(ComparisonMode::Stage, template_inputs, stage, is_updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mode_prefix_table() {
        assert_eq!(ComparisonMode::Pipeline.remove_prefix(), "template.templateInputs.");
        assert_eq!(ComparisonMode::Pipeline.process_only_prefix(), "stages[");
        assert_eq!(
            ComparisonMode::Stage.remove_prefix(),
            "stage.template.templateInputs."
        );
        assert_eq!(ComparisonMode::Stage.process_only_prefix(), "spec.");
        assert_eq!(TreeRoot::TemplateInputs.template_inputs_prefix(), "");
    }

    #[test]
    fn result_serializes_with_camel_case_flag() {
        let result = ComparisonResult::from_differences(vec![Difference::MissingInTarget {
            path: "spec.foo".into(),
        }]);
        let value: serde_json::Value =
            serde_json::from_str(&result.to_json().expect("json")).expect("parse");
        assert_eq!(value["hasDifference"], json!(true));
        assert_eq!(value["differences"][0]["kind"], json!("missing_in_target"));
        assert_eq!(value["differences"][0]["path"], json!("spec.foo"));
    }

    #[test]
    fn duplicate_findings_are_reported_once() {
        // Same stripped path reachable both with and without the prefix.
        let template = Node::from(json!({ "stages": [{ "stage": { "type": "CI" } }] }));
        let pipeline = Node::from(json!({
            "stages": [{ "stage": { "spec": { "x": "<+input>" } } }],
            "template": { "templateInputs": {
                "stages": [{ "stage": { "spec": { "x": "<+input>" } } }]
            }}
        }));
        let result = compare_template_and_pipeline(&template, &pipeline, false);
        assert_eq!(
            result.differences,
            vec![Difference::UndeclaredInTemplate {
                path: "stages[0].stage.spec.x".into()
            }]
        );
    }

    #[test]
    fn region_gate_ignores_runtime_inputs_outside_managed_prefix() {
        let template = Node::from(json!({ "stages": [] }));
        let pipeline = Node::from(json!({
            "template": { "templateInputs": { "properties": { "ci": "<+input>" } } }
        }));
        assert!(compare_template_and_pipeline(&template, &pipeline, false).is_in_sync());
    }
}
