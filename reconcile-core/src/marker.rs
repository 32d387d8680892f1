//! Runtime-input marker parsing.
//!
//! A leaf authored as `<+input>` (optionally followed by modifiers such as
//! `.default(10m).allowedValues(5m,10m)`) is a field the template expects to be
//! supplied at run time. Any other `<+...>` string is an expression, everything
//! else is a fixed value. The classification happens once, when a tree is
//! built, so the comparator never re-derives intent from raw strings.

use std::fmt;

/// The literal prefix every runtime-input leaf starts with.
pub const RUNTIME_INPUT_MARKER: &str = "<+input>";

const EXPRESSION_OPEN: &str = "<+";

/// A modifier chained after the runtime-input marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputModifier {
    /// `.default(value)`
    Default(String),
    /// `.allowedValues(a,b,c)`
    AllowedValues(Vec<String>),
    /// `.executionInput()`
    ExecutionInput,
    /// `.regex(pattern)`
    Regex(String),
    /// Anything the parser does not recognise, kept verbatim.
    Other(String),
}

/// A parsed runtime-input leaf.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeInput {
    pub modifiers: Vec<InputModifier>,
}

impl RuntimeInput {
    /// Parse `raw` if it starts with [`RUNTIME_INPUT_MARKER`].
    ///
    /// Only the prefix decides; a malformed tail still yields a runtime input
    /// whose unparsed pieces land in [`InputModifier::Other`].
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(RUNTIME_INPUT_MARKER)?;
        let modifiers = split_top_level(rest, '.')
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .map(parse_modifier)
            .collect();
        Some(Self { modifiers })
    }

    pub fn default_value(&self) -> Option<&str> {
        self.modifiers.iter().find_map(|m| match m {
            InputModifier::Default(value) => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn allowed_values(&self) -> Option<&[String]> {
        self.modifiers.iter().find_map(|m| match m {
            InputModifier::AllowedValues(values) => Some(values.as_slice()),
            _ => None,
        })
    }

    pub fn is_execution_input(&self) -> bool {
        self.modifiers
            .iter()
            .any(|m| matches!(m, InputModifier::ExecutionInput))
    }
}

impl fmt::Display for RuntimeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(RUNTIME_INPUT_MARKER)?;
        for modifier in &self.modifiers {
            match modifier {
                InputModifier::Default(value) => write!(f, ".default({value})")?,
                InputModifier::AllowedValues(values) => {
                    write!(f, ".allowedValues({})", values.join(","))?
                }
                InputModifier::ExecutionInput => f.write_str(".executionInput()")?,
                InputModifier::Regex(pattern) => write!(f, ".regex({pattern})")?,
                InputModifier::Other(raw) => write!(f, ".{raw}")?,
            }
        }
        Ok(())
    }
}

/// A scalar leaf of a reconciliation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    /// A concrete value, rendered as text (numbers, booleans and null included).
    Fixed(String),
    /// A string starting with `<+input>`.
    RuntimeInput(RuntimeInput),
    /// Any other `<+...>` expression string.
    Expression(String),
}

impl Leaf {
    /// Classify an authored string value.
    pub fn from_text(text: &str) -> Self {
        if let Some(input) = RuntimeInput::parse(text) {
            Leaf::RuntimeInput(input)
        } else if text.starts_with(EXPRESSION_OPEN) {
            Leaf::Expression(text.to_owned())
        } else {
            Leaf::Fixed(text.to_owned())
        }
    }

    /// Wrap a non-string scalar. These never count as runtime inputs, even if
    /// their rendering happened to look like the marker.
    pub fn fixed(rendered: impl Into<String>) -> Self {
        Leaf::Fixed(rendered.into())
    }

    pub fn is_runtime_input(&self) -> bool {
        matches!(self, Leaf::RuntimeInput(_))
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Fixed(text) | Leaf::Expression(text) => f.write_str(text),
            Leaf::RuntimeInput(input) => input.fmt(f),
        }
    }
}

fn parse_modifier(segment: &str) -> InputModifier {
    let other = || InputModifier::Other(segment.to_owned());
    let Some((name, tail)) = segment.split_once('(') else {
        return other();
    };
    let Some(args) = tail.strip_suffix(')') else {
        return other();
    };
    match name {
        "default" => InputModifier::Default(args.to_owned()),
        "allowedValues" => InputModifier::AllowedValues(
            split_top_level(args, ',')
                .into_iter()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
                .collect(),
        ),
        "executionInput" if args.trim().is_empty() => InputModifier::ExecutionInput,
        "regex" => InputModifier::Regex(args.to_owned()),
        _ => other(),
    }
}

/// Split on `sep` only where it is not nested inside parentheses.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
