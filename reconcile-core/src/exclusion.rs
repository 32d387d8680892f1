//! Exclusion policy for sections with their own reconciliation lifecycle.

/// Path fragments that never count as a source of difference.
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &["spec.service", "spec.environment"];

/// A set of path fragments suppressed from comparison.
///
/// Matching is plain substring containment on the full path (prefix included),
/// not an anchored segment match: `myspec.service.url` is excluded as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    fragments: Vec<String>,
}

impl ExclusionPolicy {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// A policy that excludes nothing.
    pub fn none() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// `true` if any fragment occurs anywhere in `path`.
    pub fn excludes(&self, path: &str) -> bool {
        self.fragments.iter().any(|f| path.contains(f.as_str()))
    }
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PATHS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_service_and_environment() {
        let policy = ExclusionPolicy::default();
        assert!(policy.excludes("spec.service.serviceRef"));
        assert!(policy.excludes("stage.template.templateInputs.spec.environment.environmentRef"));
        assert!(!policy.excludes("spec.execution.steps[0].step.timeout"));
    }

    #[test]
    fn matching_is_unanchored() {
        let policy = ExclusionPolicy::default();
        assert!(policy.excludes("variables.myspec.service.url"));
        assert!(policy.excludes("spec.serviceConfig.serviceRef"));
    }

    #[test]
    fn empty_policy_excludes_nothing() {
        assert!(!ExclusionPolicy::none().excludes("spec.service"));
    }
}
