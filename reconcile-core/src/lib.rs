//! Reconcile core library: typed trees, runtime-input paths, and the
//! template/pipeline reconciliation comparator.
//!
//! - [`tree`] / [`marker`]: typed trees with classified leaves
//! - [`paths`]: path enumeration, runtime-input filter, nested-path reducer
//! - [`exclusion`]: sections that never count as drift
//! - [`compare`]: the comparator and its two entry points
//! - [`source`] / [`config`]: loading trees and configuration from disk
//! - [`report`]: unified diffs of runtime-input surfaces
//!
//! ```rust
//! use reconcile_core::{compare_stage_template_and_stage, parse_tree};
//!
//! let template = parse_tree("spec:\n  foo: <+input>\n").unwrap();
//! let stage = parse_tree("stage:\n  spec: {}\n").unwrap();
//! assert!(compare_stage_template_and_stage(&template, &stage, false).has_difference);
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod marker;
pub mod paths;
pub mod report;
pub mod source;
pub mod tree;

pub use compare::{
    compare, compare_stage_template_and_stage, compare_template_and_pipeline, compare_trees,
    CompareOptions, ComparisonMode, ComparisonResult, Difference, TreeRoot,
};
pub use config::{load_config, load_config_at, ReconcileConfig};
pub use error::ReconcileError;
pub use exclusion::ExclusionPolicy;
pub use marker::{InputModifier, Leaf, RuntimeInput, RUNTIME_INPUT_MARKER};
pub use source::{load_tree, parse_tree};
pub use tree::Node;
