//! Case conditions and the categories they select on
//!
//! A condition is either the default (no selector) or `category.value`,
//! e.g. `plural.one` or `gender.female`. Categories accumulate the distinct
//! values seen for one name across a label or a whole section tree.

use std::fmt;

use serde::Serialize;

use crate::casing::to_camel_case;
use crate::error::{LabelError, LabelResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Condition {
    Default,
    Category { category: String, value: String },
}

impl Condition {
    /// Parse optional condition text
    ///
    /// `None`, empty or whitespace-only text is the default condition. Anything
    /// else must be `<category>.<value>` with exactly one `.`; the value is
    /// camel-cased.
    pub fn parse(text: Option<&str>) -> LabelResult<Self> {
        let text = match text.map(str::trim) {
            None | Some("") => return Ok(Condition::Default),
            Some(text) => text,
        };

        let mut parts = text.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(category), Some(value), None) => {
                let category = category.trim();
                let value = to_camel_case(value.trim());
                if category.is_empty() || value.is_empty() {
                    return Err(LabelError::ConditionFormat {
                        text: text.to_string(),
                    });
                }
                Ok(Condition::Category {
                    category: category.to_string(),
                    value,
                })
            }
            _ => Err(LabelError::ConditionFormat {
                text: text.to_string(),
            }),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Condition::Default)
    }

    /// Category name, for category conditions
    pub fn category_name(&self) -> Option<&str> {
        match self {
            Condition::Default => None,
            Condition::Category { category, .. } => Some(category),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Default => write!(f, "default"),
            Condition::Category { category, value } => write!(f, "{}.{}", category, value),
        }
    }
}

/// A named axis of variation and the distinct values observed for it.
///
/// Identity is the name; values keep first-seen order so output is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub values: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn add_value(&mut self, value: &str) {
        if !self.values.iter().any(|v| v == value) {
            self.values.push(value.to_string());
        }
    }

    /// Union another category's values into this one. Names are not checked.
    pub fn merge(&mut self, other: &Category) {
        for value in &other.values {
            self.add_value(value);
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Merge `category` into `accumulator` by name, keeping first-occurrence order.
pub fn merge_category(accumulator: &mut Vec<Category>, category: &Category) {
    match accumulator.iter_mut().find(|c| c.name == category.name) {
        Some(existing) => existing.merge(category),
        None => accumulator.push(category.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn test_parse_default(#[case] text: Option<&str>) {
        assert_eq!(Condition::parse(text), Ok(Condition::Default));
    }

    #[test]
    fn test_parse_category() {
        let condition = Condition::parse(Some(" plural.one ")).unwrap();
        assert_eq!(
            condition,
            Condition::Category {
                category: "plural".to_string(),
                value: "one".to_string(),
            }
        );
        assert_eq!(condition.category_name(), Some("plural"));
        assert!(!condition.is_default());
    }

    #[test]
    fn test_parse_camel_cases_value() {
        let condition = Condition::parse(Some("gender.Male_form")).unwrap();
        assert_eq!(condition.to_string(), "gender.maleForm");
    }

    #[rstest]
    #[case("plural")]
    #[case("plural.one.extra")]
    #[case(".one")]
    #[case("plural.")]
    fn test_parse_rejects_malformed(#[case] text: &str) {
        assert_eq!(
            Condition::parse(Some(text)),
            Err(LabelError::ConditionFormat {
                text: text.to_string()
            })
        );
    }

    #[test]
    fn test_category_values_are_deduplicated() {
        let mut category = Category::new("plural");
        category.add_value("one");
        category.add_value("other");
        category.add_value("one");
        assert_eq!(category.values, vec!["one", "other"]);
        assert!(category.contains("other"));
    }

    #[test]
    fn test_merge_category_by_name() {
        let mut plural_a = Category::new("plural");
        plural_a.add_value("one");
        let mut gender = Category::new("gender");
        gender.add_value("female");
        let mut plural_b = Category::new("plural");
        plural_b.add_value("other");
        plural_b.add_value("one");

        let mut accumulator = Vec::new();
        merge_category(&mut accumulator, &plural_a);
        merge_category(&mut accumulator, &gender);
        merge_category(&mut accumulator, &plural_b);

        assert_eq!(accumulator.len(), 2);
        assert_eq!(accumulator[0].name, "plural");
        assert_eq!(accumulator[0].values, vec!["one", "other"]);
        assert_eq!(accumulator[1].name, "gender");
    }
}
