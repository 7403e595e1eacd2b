use serde::Serialize;
use tracing::debug;

use crate::casing::{to_camel_case, to_pascal_case};
use crate::condition::{Category, Condition, merge_category};
use crate::error::{LabelError, LabelResult};
use crate::label::{Case, Label, Translation};

/// Key given to a section built without a path
pub const ROOT_KEY: &str = "labels";

/// A grouping node in the label hierarchy.
///
/// Each section owns its labels and child sections directly. `path` is the
/// parent's path plus `key`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub path: Vec<String>,
    pub key: String,
    pub labels: Vec<Label>,
    pub children: Vec<Section>,
}

/// A label path with its optional `(condition)` suffix split off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPath<'a> {
    pub segments: Vec<&'a str>,
    pub condition: Option<&'a str>,
}

impl<'a> LabelPath<'a> {
    /// Split `home.items(plural.one)` into `["home", "items"]` and `plural.one`.
    pub fn parse(path: &'a str) -> LabelResult<Self> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(LabelError::EmptyPath);
        }
        let malformed = |reason: &str| LabelError::MalformedPath {
            path: trimmed.to_string(),
            reason: reason.to_string(),
        };

        let (dotted, condition) = match (trimmed.find('('), trimmed.find(')')) {
            (None, None) => (trimmed, None),
            (Some(open), Some(close)) if open < close => {
                (&trimmed[..open], Some(&trimmed[open + 1..close]))
            }
            (Some(_), None) => return Err(malformed("'(' without a closing ')'")),
            (None, Some(_)) => return Err(malformed("')' without an opening '('")),
            _ => return Err(malformed("')' before '('")),
        };

        let segments: Vec<&str> = dotted.split('.').map(str::trim).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(malformed("empty path segment"));
        }
        Ok(LabelPath {
            segments,
            condition: condition.filter(|c| !c.trim().is_empty()),
        })
    }
}

impl Section {
    /// An empty section at `path`; its key is the last segment.
    ///
    /// An empty path becomes `[ROOT_KEY]`.
    pub fn new(mut path: Vec<String>) -> Self {
        if path.is_empty() {
            path.push(ROOT_KEY.to_string());
        }
        let key = path[path.len() - 1].clone();
        Section {
            path,
            key,
            labels: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A synthetic root keyed by [`ROOT_KEY`]
    pub fn root() -> Self {
        Section::new(vec![ROOT_KEY.to_string()])
    }

    /// Insert one row of input.
    ///
    /// `path` is dotted (`home.items`) and may end in `(category.value)`.
    /// The condition may be given either there or as `condition_text`, not both;
    /// a blank one on either side counts as absent. The case is built before
    /// any section is created, so a rejected row leaves the tree untouched.
    pub fn insert(
        &mut self,
        path: &str,
        condition_text: Option<&str>,
        translations: Vec<Translation>,
    ) -> LabelResult<()> {
        let parsed = LabelPath::parse(path)?;
        let condition_text = match (parsed.condition, condition_text) {
            (Some(_), Some(explicit)) if !explicit.trim().is_empty() => {
                return Err(LabelError::ConflictingCondition {
                    path: path.trim().to_string(),
                });
            }
            (Some(suffix), _) => Some(suffix),
            (None, explicit) => explicit,
        };
        let condition = Condition::parse(condition_text)?;
        let key = parsed.segments.last().ok_or(LabelError::EmptyPath)?;
        let case = Case::new(key, condition, translations)?;
        self.insert_segments(&parsed.segments, case)
    }

    fn insert_segments(&mut self, segments: &[&str], case: Case) -> LabelResult<()> {
        match segments {
            [] => Err(LabelError::EmptyPath),
            [key] => match self.label_position(key) {
                Some(index) => self.labels[index].add_case(case),
                None => {
                    let label = Label::new(*key, case)?;
                    self.labels.push(label);
                    Ok(())
                }
            },
            [head, rest @ ..] => {
                let index = match self.child_position(head) {
                    Some(index) => index,
                    None => self.create_child(head),
                };
                self.children[index].insert_segments(rest, case)
            }
        }
    }

    fn label_position(&self, key: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.key == key)
    }

    fn child_position(&self, key: &str) -> Option<usize> {
        self.children.iter().position(|c| c.key == key)
    }

    fn create_child(&mut self, key: &str) -> usize {
        let mut path = self.path.clone();
        path.push(key.to_string());
        debug!(section = %path.join("."), "created section");
        self.children.push(Section::new(path));
        self.children.len() - 1
    }

    /// Move this section under `parent`, rewriting paths down the subtree.
    pub fn reparent(&mut self, parent: &[String]) {
        let mut path = parent.to_vec();
        path.push(self.key.clone());
        self.path = path;
        for child in &mut self.children {
            child.reparent(&self.path);
        }
    }

    pub fn label(&self, key: &str) -> Option<&Label> {
        self.label_position(key).map(|i| &self.labels[i])
    }

    pub fn child(&self, key: &str) -> Option<&Section> {
        self.child_position(key).map(|i| &self.children[i])
    }

    /// Follow a dotted path of child keys, e.g. `home.dialogs`.
    pub fn find_section(&self, dotted: &str) -> Option<&Section> {
        dotted
            .split('.')
            .map(str::trim)
            .try_fold(self, |section, key| section.child(key))
    }

    /// Every label in this section and its descendants.
    ///
    /// This section's labels come first, then each child's in insertion order.
    pub fn all_labels(&self) -> Vec<&Label> {
        let mut labels: Vec<&Label> = self.labels.iter().collect();
        for child in &self.children {
            labels.extend(child.all_labels());
        }
        labels
    }

    /// Labels paired with the section that owns them, in [`Section::all_labels`] order
    pub fn labels_with_sections(&self) -> Vec<(&Section, &Label)> {
        let mut pairs: Vec<(&Section, &Label)> = self.labels.iter().map(|l| (self, l)).collect();
        for child in &self.children {
            pairs.extend(child.labels_with_sections());
        }
        pairs
    }

    /// Categories used anywhere below this section, merged by name.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for label in self.all_labels() {
            if let Some(category) = label.category() {
                merge_category(&mut categories, &category);
            }
        }
        categories
    }

    pub fn camel_key(&self) -> String {
        to_camel_case(&self.key)
    }

    /// Pascal-cased path segments joined with `_`, e.g. `AppLocalizations_Labels_Home`
    pub fn normalized_name(&self) -> String {
        self.path
            .iter()
            .map(|segment| to_pascal_case(segment))
            .collect::<Vec<_>>()
            .join("_")
    }
}
