use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

/// `{{name}}` or `{{name:Type}}`. Unknown type names do not match, so the token is left as text.
static TEMPLATED_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_-]+)(?::(DateTime|String|int|double|num))?\}\}")
        .expect("valid templated value regex")
});

/// Runtime type of a templated value, as annotated after the `:`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ValueType {
    DateTime,
    #[default]
    String,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "num")]
    Num,
}

impl ValueType {
    /// Parse one of the fixed type names. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DateTime" => Some(ValueType::DateTime),
            "String" => Some(ValueType::String),
            "int" => Some(ValueType::Int),
            "double" => Some(ValueType::Double),
            "num" => Some(ValueType::Num),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::DateTime => "DateTime",
            ValueType::String => "String",
            ValueType::Int => "int",
            ValueType::Double => "double",
            ValueType::Num => "num",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A runtime-substitutable slot found in a translation.
///
/// Two templated values are equal (and hash the same) when their keys match,
/// regardless of type annotation or position. This lets cases compare their
/// placeholder sets with plain set semantics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatedValue {
    /// Character offset of the opening `{{`
    pub start_index: usize,
    /// Character offset just past the closing `}}`
    pub end_index: usize,
    /// Full matched text, braces included
    pub raw_token: String,
    pub key: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

impl TemplatedValue {
    /// Build a value from a single token. `raw_token` must be exactly one
    /// `{{name}}` / `{{name:Type}}`, with nothing before or after it.
    pub fn new(start_index: usize, end_index: usize, raw_token: &str) -> Option<Self> {
        let captures = TEMPLATED_VALUE_REGEX.captures(raw_token)?;
        if captures.get(0)?.as_str() != raw_token {
            return None;
        }
        Self::from_captures(start_index, end_index, &captures)
    }

    fn from_captures(
        start_index: usize,
        end_index: usize,
        captures: &Captures<'_>,
    ) -> Option<Self> {
        let value_type = match captures.get(2) {
            Some(name) => ValueType::from_name(name.as_str())?,
            None => ValueType::default(),
        };
        Some(TemplatedValue {
            start_index,
            end_index,
            raw_token: captures.get(0)?.as_str().to_string(),
            key: captures.get(1)?.as_str().to_string(),
            value_type,
        })
    }
}

impl PartialEq for TemplatedValue {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TemplatedValue {}

impl Hash for TemplatedValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for TemplatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_token)
    }
}

/// Scan a translation for templated values
///
/// Returns every non-overlapping `{{name}}` / `{{name:Type}}` token, left to right.
/// Spans are character offsets into `text`.
///
/// # Example
/// ```
/// use label_tree::placeholder::extract_templated_values;
///
/// let values = extract_templated_values("Hello {{first_name}}, you have {{count:int}} items");
/// assert_eq!(values.len(), 2);
/// assert_eq!(values[1].key, "count");
/// assert_eq!(values[1].value_type.as_str(), "int");
/// ```
pub fn extract_templated_values(text: &str) -> Vec<TemplatedValue> {
    let mut values = Vec::new();
    let mut chars_before = 0;
    let mut last_byte = 0;

    for captures in TEMPLATED_VALUE_REGEX.captures_iter(text) {
        let Some(m) = captures.get(0) else { continue };
        chars_before += text[last_byte..m.start()].chars().count();
        let start = chars_before;
        let end = start + m.as_str().chars().count();
        chars_before = end;
        last_byte = m.end();

        if let Some(value) = TemplatedValue::from_captures(start, end, &captures) {
            values.push(value);
        }
    }
    values
}

/// Keys of a placeholder list as a set, for comparing cases and translations
pub fn templated_value_set(values: &[TemplatedValue]) -> HashSet<&TemplatedValue> {
    values.iter().collect()
}

/// Sorted, comma separated keys, used in error messages
pub(crate) fn describe_keys(values: &HashSet<&TemplatedValue>) -> String {
    let mut keys: Vec<&str> = values.iter().map(|v| v.key.as_str()).collect();
    keys.sort_unstable();
    if keys.is_empty() {
        "none".to_string()
    } else {
        keys.join(", ")
    }
}
