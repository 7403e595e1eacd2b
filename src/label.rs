use serde::Serialize;
use tracing::debug;

use crate::casing::to_camel_case;
use crate::condition::{Category, Condition};
use crate::error::{LabelError, LabelResult};
use crate::placeholder::{
    TemplatedValue, describe_keys, extract_templated_values, templated_value_set,
};

/// One language's rendering of a case
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub language_code: String,
    pub value: String,
    pub templated_values: Vec<TemplatedValue>,
}

impl Translation {
    pub fn new(language_code: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let templated_values = extract_templated_values(&value);
        Translation {
            language_code: language_code.into(),
            value,
            templated_values,
        }
    }
}

/// One conditional variant of a label, holding a translation per language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    pub condition: Condition,
    pub translations: Vec<Translation>,
}

impl Case {
    /// Build a case, checking that every translation uses the same placeholders.
    ///
    /// `label` only names the owner in error messages.
    pub fn new(
        label: &str,
        condition: Condition,
        translations: Vec<Translation>,
    ) -> LabelResult<Self> {
        if let Some((first, rest)) = translations.split_first() {
            let expected = templated_value_set(&first.templated_values);
            for translation in rest {
                let found = templated_value_set(&translation.templated_values);
                if found != expected {
                    return Err(LabelError::PlaceholderMismatch {
                        label: label.to_string(),
                        condition: condition.to_string(),
                        detail: format!(
                            "'{}' uses [{}] but '{}' uses [{}]",
                            first.language_code,
                            describe_keys(&expected),
                            translation.language_code,
                            describe_keys(&found)
                        ),
                    });
                }
            }
        }
        Ok(Case {
            condition,
            translations,
        })
    }

    /// Placeholders of the first translation; all translations agree on the set.
    pub fn templated_values(&self) -> &[TemplatedValue] {
        self.translations
            .first()
            .map(|t| t.templated_values.as_slice())
            .unwrap_or_default()
    }

    pub fn translation(&self, language_code: &str) -> Option<&Translation> {
        self.translations
            .iter()
            .find(|t| t.language_code == language_code)
    }
}

/// A localizable string identity with one or more conditional cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub key: String,
    pub cases: Vec<Case>,
}

impl Label {
    pub fn new(key: impl Into<String>, case: Case) -> LabelResult<Self> {
        let label = Label {
            key: key.into(),
            cases: vec![case],
        };
        debug!(label = %label.key, "created label");
        label.validate()?;
        Ok(label)
    }

    /// Append a case and re-check the label.
    ///
    /// The case stays appended even if the check fails.
    pub fn add_case(&mut self, case: Case) -> LabelResult<()> {
        debug!(label = %self.key, condition = %case.condition, "adding case");
        self.cases.push(case);
        self.validate()
    }

    /// The label's category, built from all of its category conditions.
    ///
    /// Named after the first category condition; values are collected from
    /// every category case.
    pub fn category(&self) -> Option<Category> {
        let mut category: Option<Category> = None;
        for case in &self.cases {
            if let Condition::Category { category: name, value } = &case.condition {
                category
                    .get_or_insert_with(|| Category::new(name.clone()))
                    .add_value(value);
            }
        }
        category
    }

    /// The label's placeholder set, taken from its first case.
    pub fn templated_values(&self) -> &[TemplatedValue] {
        self.cases
            .first()
            .map(Case::templated_values)
            .unwrap_or_default()
    }

    pub fn default_case(&self) -> Option<&Case> {
        self.cases.iter().find(|c| c.condition.is_default())
    }

    pub fn camel_key(&self) -> String {
        to_camel_case(&self.key)
    }

    /// Check the label-wide invariants: at most one default case, a single
    /// category among category cases, and one placeholder set for all cases.
    pub fn validate(&self) -> LabelResult<()> {
        let defaults = self
            .cases
            .iter()
            .filter(|c| c.condition.is_default())
            .count();
        if defaults > 1 {
            return Err(LabelError::DuplicateDefaultCase {
                label: self.key.clone(),
            });
        }

        let mut names = self.cases.iter().filter_map(|c| c.condition.category_name());
        if let Some(first) = names.next() {
            if let Some(other) = names.find(|name| *name != first) {
                return Err(LabelError::MixedCategory {
                    label: self.key.clone(),
                    first: first.to_string(),
                    other: other.to_string(),
                });
            }
        }

        let expected = templated_value_set(self.templated_values());
        for case in self.cases.iter().skip(1) {
            let found = templated_value_set(case.templated_values());
            if found != expected {
                return Err(LabelError::PlaceholderMismatch {
                    label: self.key.clone(),
                    condition: case.condition.to_string(),
                    detail: format!(
                        "label uses [{}] but this case uses [{}]",
                        describe_keys(&expected),
                        describe_keys(&found)
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(condition: Option<&str>, en: &str, fr: &str) -> Case {
        Case::new(
            "test",
            Condition::parse(condition).unwrap(),
            vec![Translation::new("en", en), Translation::new("fr", fr)],
        )
        .unwrap()
    }

    #[test]
    fn test_translation_extracts_templated_values() {
        let translation = Translation::new("en", "Hi {{name}}");
        assert_eq!(translation.templated_values.len(), 1);
        assert_eq!(translation.templated_values[0].key, "name");
    }

    #[test]
    fn test_case_rejects_mismatched_translations() {
        let result = Case::new(
            "greeting",
            Condition::Default,
            vec![
                Translation::new("en", "Hi {{name}}"),
                Translation::new("fr", "Salut {{nom}}"),
            ],
        );
        match result {
            Err(LabelError::PlaceholderMismatch { label, detail, .. }) => {
                assert_eq!(label, "greeting");
                assert!(detail.contains("'fr' uses [nom]"));
            }
            other => panic!("expected placeholder mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_case_ignores_type_annotation_differences() {
        let case = Case::new(
            "items",
            Condition::Default,
            vec![
                Translation::new("en", "{{count:int}} items"),
                Translation::new("fr", "{{count}} articles"),
            ],
        )
        .unwrap();
        assert_eq!(case.templated_values().len(), 1);
        assert_eq!(case.translation("fr").unwrap().value, "{{count}} articles");
    }

    #[test]
    fn test_case_without_translations_has_no_templated_values() {
        let case = Case::new("empty", Condition::Default, Vec::new()).unwrap();
        assert!(case.templated_values().is_empty());
    }

    #[test]
    fn test_label_category_collects_all_values() {
        let mut label = Label::new("items", case(Some("plural.one"), "One", "Un")).unwrap();
        label
            .add_case(case(Some("plural.other"), "Many", "Plusieurs"))
            .unwrap();

        let category = label.category().unwrap();
        assert_eq!(category.name, "plural");
        assert_eq!(category.values, vec!["one", "other"]);
    }

    #[test]
    fn test_label_without_category_conditions() {
        let label = Label::new("title", case(None, "Title", "Titre")).unwrap();
        assert!(label.category().is_none());
        assert!(label.default_case().is_some());
    }

    // Rejected on the second default, not only once two already exist.
    #[test]
    fn test_second_default_case_is_rejected() {
        let mut label = Label::new("title", case(None, "Title", "Titre")).unwrap();
        let result = label.add_case(case(None, "Other", "Autre"));
        assert_eq!(
            result,
            Err(LabelError::DuplicateDefaultCase {
                label: "title".to_string()
            })
        );
        // no rollback
        assert_eq!(label.cases.len(), 2);
    }

    // Likewise rejected on the first case that introduces another category.
    #[test]
    fn test_second_category_is_rejected() {
        let mut label = Label::new("greeting", case(Some("plural.one"), "Hi", "Salut")).unwrap();
        let result = label.add_case(case(Some("gender.female"), "Hi", "Salut"));
        assert_eq!(
            result,
            Err(LabelError::MixedCategory {
                label: "greeting".to_string(),
                first: "plural".to_string(),
                other: "gender".to_string(),
            })
        );
    }

    #[test]
    fn test_default_and_category_cases_coexist() {
        let mut label = Label::new("items", case(None, "Items", "Articles")).unwrap();
        label.add_case(case(Some("plural.one"), "Item", "Article")).unwrap();
        label.add_case(case(Some("plural.other"), "Items", "Articles")).unwrap();
        assert_eq!(label.cases.len(), 3);
    }

    #[test]
    fn test_cases_must_share_templated_values() {
        let mut label =
            Label::new("unread", case(Some("plural.one"), "{{count}} mail", "{{count}} mail"))
                .unwrap();
        let result = label.add_case(case(Some("plural.other"), "Many mails", "Des mails"));
        match result {
            Err(LabelError::PlaceholderMismatch { condition, .. }) => {
                assert_eq!(condition, "plural.other");
            }
            other => panic!("expected placeholder mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_label_templated_values_and_camel_key() {
        let label = Label::new(
            "welcome_back",
            case(None, "Welcome {{user:String}}", "Bienvenue {{user}}"),
        )
        .unwrap();
        assert_eq!(label.templated_values()[0].key, "user");
        assert_eq!(label.camel_key(), "welcomeBack");
    }
}
