use icu_locale::Locale;
use serde::Serialize;
use tracing::warn;

use crate::condition::Category;
use crate::error::{LabelError, LabelResult};
use crate::label::{Label, Translation};
use crate::section::Section;

pub const DEFAULT_APP_NAME: &str = "AppLocalizations";

/// Root declaration for all labels of an app.
///
/// Fixes the root section's path to `[name, "Labels"]` and carries the
/// ordered list of supported language codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppLabels {
    pub name: String,
    pub languages: Vec<String>,
    pub section: Section,
}

/// A case missing a translation for one of the supported languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageGap {
    pub label: String,
    pub condition: String,
    pub language_code: String,
}

impl AppLabels {
    pub fn new(name: &str, languages: Vec<String>) -> LabelResult<Self> {
        Self::with_contents(name, languages, Vec::new(), Vec::new())
    }

    /// Declare the root with pre-seeded labels and child sections.
    pub fn with_contents(
        name: &str,
        languages: Vec<String>,
        labels: Vec<Label>,
        children: Vec<Section>,
    ) -> LabelResult<Self> {
        validate_languages(&languages)?;
        let mut section = Section::new(vec![name.to_string(), "Labels".to_string()]);
        section.labels = labels;
        for mut child in children {
            child.reparent(&section.path);
            section.children.push(child);
        }
        Ok(AppLabels {
            name: name.to_string(),
            languages,
            section,
        })
    }

    pub fn insert(
        &mut self,
        path: &str,
        condition_text: Option<&str>,
        translations: Vec<Translation>,
    ) -> LabelResult<()> {
        self.section.insert(path, condition_text, translations)
    }

    /// Build translations from `(language, value)` pairs in supported-language
    /// order, then insert. Pairs for unsupported languages are skipped.
    pub fn insert_values<'v, I>(
        &mut self,
        path: &str,
        condition_text: Option<&str>,
        values: I,
    ) -> LabelResult<()>
    where
        I: IntoIterator<Item = (&'v str, &'v str)>,
    {
        let values: Vec<(&str, &str)> = values.into_iter().collect();
        for &(language, _) in &values {
            if !self.supports(language) {
                warn!(path, language, "skipping translation for unsupported language");
            }
        }
        let translations = self
            .languages
            .iter()
            .filter_map(|language| {
                values
                    .iter()
                    .find(|(code, _)| *code == language.as_str())
                    .map(|(code, value)| Translation::new(*code, *value))
            })
            .collect();
        self.insert(path, condition_text, translations)
    }

    pub fn supports(&self, language_code: &str) -> bool {
        self.languages.iter().any(|l| l == language_code)
    }

    pub fn all_labels(&self) -> Vec<&Label> {
        self.section.all_labels()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.section.categories()
    }

    /// Cases lacking a translation in a supported language, in label order
    pub fn coverage_gaps(&self) -> Vec<CoverageGap> {
        let mut gaps = Vec::new();
        for (section, label) in self.section.labels_with_sections() {
            let label_path = section
                .path
                .iter()
                .skip(self.section.path.len())
                .chain(std::iter::once(&label.key))
                .cloned()
                .collect::<Vec<_>>()
                .join(".");
            for case in &label.cases {
                for language in &self.languages {
                    if case.translation(language).is_none() {
                        gaps.push(CoverageGap {
                            label: label_path.clone(),
                            condition: case.condition.to_string(),
                            language_code: language.clone(),
                        });
                    }
                }
            }
        }
        gaps
    }
}

fn validate_languages(languages: &[String]) -> LabelResult<()> {
    if languages.is_empty() {
        return Err(LabelError::NoLanguages);
    }
    for (i, code) in languages.iter().enumerate() {
        code.parse::<Locale>()
            .map_err(|e| LabelError::InvalidLanguage {
                code: code.clone(),
                reason: e.to_string(),
            })?;
        if languages[..i].contains(code) {
            return Err(LabelError::InvalidLanguage {
                code: code.clone(),
                reason: "duplicate language code".to_string(),
            });
        }
    }
    Ok(())
}
