//! Typed reconciliation trees.
//!
//! A [`Node`] mirrors a parsed pipeline, stage, or template-inputs document:
//! ordered mappings, ordered sequences, and classified [`Leaf`] scalars.
//! Trees are built from `serde_yaml` or `serde_json` values and are never
//! mutated by the comparator.

use serde_yaml::Value as YamlValue;

use crate::marker::{Leaf, RuntimeInput};

/// A node in a pipeline, stage, or template-inputs tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Ordered mapping of string keys to children.
    Map(Vec<(String, Node)>),
    /// Ordered sequence of children.
    Seq(Vec<Node>),
    /// Scalar value.
    Leaf(Leaf),
}

/// One step of a path address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

impl Node {
    /// An empty mapping.
    pub fn empty() -> Self {
        Node::Map(Vec::new())
    }

    /// Shorthand for a string leaf, classified like authored YAML text.
    pub fn text(value: &str) -> Self {
        Node::Leaf(Leaf::from_text(value))
    }

    /// Child of a mapping by key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, child)| child),
            _ => None,
        }
    }

    /// Child of a sequence by index.
    pub fn index(&self, idx: usize) -> Option<&Node> {
        match self {
            Node::Seq(items) => items.get(idx),
            _ => None,
        }
    }

    /// Resolve a dotted/bracketed path such as `stages[0].stage.spec`.
    ///
    /// The empty path resolves to `self`. Malformed paths resolve to `None`.
    pub fn resolve(&self, path: &str) -> Option<&Node> {
        let segments = parse_path(path)?;
        segments
            .into_iter()
            .try_fold(self, |node, segment| match segment {
                Segment::Key(key) => node.get(key),
                Segment::Index(idx) => node.index(idx),
            })
    }

    /// The parsed marker when this node is a runtime-input leaf.
    pub fn runtime_input(&self) -> Option<&RuntimeInput> {
        match self {
            Node::Leaf(Leaf::RuntimeInput(input)) => Some(input),
            _ => None,
        }
    }

    /// `true` when this node is a runtime-input leaf.
    pub fn is_runtime_input(&self) -> bool {
        matches!(self, Node::Leaf(leaf) if leaf.is_runtime_input())
    }

    /// Strip every leaf that is not a runtime input, dropping containers that
    /// end up empty. This is the template-inputs view of a concrete tree.
    ///
    /// Returns `None` when nothing runtime-configurable remains.
    pub fn runtime_inputs_view(&self) -> Option<Node> {
        match self {
            Node::Leaf(leaf) if leaf.is_runtime_input() => Some(self.clone()),
            Node::Leaf(_) => None,
            Node::Map(entries) => {
                let kept: Vec<(String, Node)> = entries
                    .iter()
                    .filter_map(|(k, child)| child.runtime_inputs_view().map(|c| (k.clone(), c)))
                    .collect();
                (!kept.is_empty()).then_some(Node::Map(kept))
            }
            Node::Seq(items) => {
                // Sequence positions are part of the path, so keep them stable.
                let kept: Vec<Option<Node>> =
                    items.iter().map(Node::runtime_inputs_view).collect();
                if kept.iter().all(Option::is_none) {
                    return None;
                }
                Some(Node::Seq(
                    kept.into_iter()
                        .map(|c| c.unwrap_or_else(Node::empty))
                        .collect(),
                ))
            }
        }
    }
}

/// Split a path into key and index segments.
///
/// `a.b[0][1].c` becomes `Key(a) Key(b) Index(0) Index(1) Key(c)`.
pub fn parse_path(path: &str) -> Option<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    if path.is_empty() {
        return Some(segments);
    }
    for piece in path.split('.') {
        let (key, mut rest) = match piece.find('[') {
            Some(pos) => piece.split_at(pos),
            None => (piece, ""),
        };
        if !key.is_empty() {
            segments.push(Segment::Key(key));
        } else if rest.is_empty() {
            return None;
        }
        while !rest.is_empty() {
            let inner = rest.strip_prefix('[')?;
            let close = inner.find(']')?;
            let idx = inner[..close].parse::<usize>().ok()?;
            segments.push(Segment::Index(idx));
            rest = &inner[close + 1..];
        }
    }
    Some(segments)
}

impl From<&YamlValue> for Node {
    fn from(value: &YamlValue) -> Self {
        match value {
            YamlValue::Null => Node::Leaf(Leaf::fixed("null")),
            YamlValue::Bool(b) => Node::Leaf(Leaf::fixed(b.to_string())),
            YamlValue::Number(n) => Node::Leaf(Leaf::fixed(n.to_string())),
            YamlValue::String(s) => Node::text(s),
            YamlValue::Sequence(items) => Node::Seq(items.iter().map(Node::from).collect()),
            YamlValue::Mapping(mapping) => Node::Map(
                mapping
                    .iter()
                    .filter_map(|(k, v)| match yaml_key(k) {
                        Some(key) => Some((key, Node::from(v))),
                        None => {
                            tracing::debug!(key = ?k, "skipping non-scalar mapping key");
                            None
                        }
                    })
                    .collect(),
            ),
            YamlValue::Tagged(tagged) => Node::from(&tagged.value),
        }
    }
}

impl From<YamlValue> for Node {
    fn from(value: YamlValue) -> Self {
        Node::from(&value)
    }
}

impl From<&serde_json::Value> for Node {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Node::Leaf(Leaf::fixed("null")),
            Value::Bool(b) => Node::Leaf(Leaf::fixed(b.to_string())),
            Value::Number(n) => Node::Leaf(Leaf::fixed(n.to_string())),
            Value::String(s) => Node::text(s),
            Value::Array(items) => Node::Seq(items.iter().map(Node::from).collect()),
            Value::Object(map) => Node::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Node::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        Node::from(&value)
    }
}

fn yaml_key(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Null => Some("null".to_string()),
        YamlValue::Tagged(tagged) => yaml_key(&tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}
