use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::app::AppLabels;
use crate::error::{LoadError, LoadResult};

/// One input row
///
/// ```json
/// {
///     "key": "inbox.unread(plural.one)",
///     "translations": { "en": "{{count:int}} unread message", "fr": "{{count:int}} message non lu" }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LabelRecord {
    /// Dotted path, optionally ending in `(category.value)`
    pub key: String,
    /// Condition given separately instead of as a key suffix
    #[serde(default)]
    pub condition: Option<String>,
    /// Values keyed by language code
    pub translations: HashMap<String, String>,
}

fn read_json(path: &Path) -> LoadResult<Value> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Insert records in order
pub fn insert_records(app: &mut AppLabels, records: &[LabelRecord]) -> LoadResult<()> {
    for record in records {
        let values = record
            .translations
            .iter()
            .map(|(language, value)| (language.as_str(), value.as_str()));
        app.insert_values(&record.key, record.condition.as_deref(), values)?;
    }
    Ok(())
}

/// Load a JSON array of [`LabelRecord`]s and insert them in file order
///
/// # Arguments
/// * `path` - Path to a JSON file whose root is an array of records
/// * `app` - App root the records are inserted into
///
/// # Returns
/// `Ok(())` once every record has been inserted
///
/// # Errors
/// Returns [`LoadError::Io`] or [`LoadError::Json`] if the file cannot be read or parsed,
/// [`LoadError::InvalidInput`] if the root is not an array, and [`LoadError::Model`] for
/// the first record the tree rejects. Records before it stay inserted.
pub fn load_records_from_file(path: &Path, app: &mut AppLabels) -> LoadResult<()> {
    let json = read_json(path)?;
    if !json.is_array() {
        return Err(LoadError::InvalidInput {
            path: path.to_path_buf(),
            reason: "root must be an array of records".to_string(),
        });
    }
    let records: Vec<LabelRecord> =
        serde_json::from_value(json).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(count = records.len(), "loaded records from {}", path.display());
    insert_records(app, &records)
}

/// Load per-language message files from a directory
///
/// Every `<lang>.json` whose name is a supported language is read. Each file
/// is a flat object of `"dotted.key(optional.condition)": "value"`; keys
/// starting with `@` are metadata and skipped. Values are grouped by key and
/// inserted in key order.
///
/// # Arguments
/// * `dir` - Directory containing the `<lang>.json` message files
/// * `app` - App root whose supported languages select the files to read
///
/// # Returns
/// `Ok(())` once every grouped key has been inserted
///
/// # Errors
/// Returns [`LoadError::InvalidInput`] if `dir` is not a directory or a file's root
/// is not an object, [`LoadError::Io`] or [`LoadError::Json`] if a message file cannot
/// be read or parsed, and [`LoadError::Model`] for the first key the tree rejects.
/// Non-string values are skipped with a warning.
pub fn load_labels_from_dir(dir: &Path, app: &mut AppLabels) -> LoadResult<()> {
    if !dir.is_dir() {
        return Err(LoadError::InvalidInput {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let mut grouped: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
    let mut files = 0;

    for language in app.languages.clone() {
        let path = dir.join(format!("{}.json", language));
        if !path.exists() {
            warn!("No message file for language '{}' in {}", language, dir.display());
            continue;
        }
        files += 1;

        let json = read_json(&path)?;
        let obj = json.as_object().ok_or_else(|| LoadError::InvalidInput {
            path: path.clone(),
            reason: "root must be an object".to_string(),
        })?;

        for (key, value) in obj {
            if key.starts_with('@') {
                continue;
            }
            match value.as_str() {
                Some(message) => grouped
                    .entry(key.clone())
                    .or_default()
                    .push((language.clone(), message.to_string())),
                None => warn!("Message '{}' in {} is not a string, skipping", key, path.display()),
            }
        }
    }

    if files == 0 {
        warn!("No message files found in directory {}", dir.display());
    }

    for (key, values) in &grouped {
        app.insert_values(
            key,
            None,
            values.iter().map(|(l, v)| (l.as_str(), v.as_str())),
        )?;
    }
    Ok(())
}

/// Load from a records file or a message directory, depending on what `path` is.
pub fn load_labels(path: &Path, app: &mut AppLabels) -> LoadResult<()> {
    if path.is_dir() {
        load_labels_from_dir(path, app)
    } else {
        load_records_from_file(path, app)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::error::LabelError;

    fn app() -> AppLabels {
        AppLabels::new("AppLocalizations", vec!["en".to_string(), "fr".to_string()]).unwrap()
    }

    #[test]
    fn test_load_records_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("labels.json");
        fs::write(
            &path,
            r#"[
                {"key": "home.title", "translations": {"fr": "Accueil", "en": "Home"}},
                {"key": "inbox.unread(plural.one)", "translations": {"en": "{{count:int}} message", "fr": "{{count}} message"}},
                {"key": "inbox.unread", "condition": "plural.other", "translations": {"en": "{{count:int}} messages", "fr": "{{count}} messages"}}
            ]"#,
        )
        .unwrap();

        let mut app = app();
        load_records_from_file(&path, &mut app).unwrap();

        let labels = app.all_labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].key, "title");
        assert_eq!(labels[0].cases[0].translations[0].language_code, "en");
        assert_eq!(labels[1].cases.len(), 2);
        assert_eq!(labels[1].cases[1].translations[1].language_code, "fr");
        assert_eq!(app.categories()[0].values, vec!["one", "other"]);
    }

    #[test]
    fn test_load_records_rejects_non_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("labels.json");
        fs::write(&path, r#"{"key": "a"}"#).unwrap();

        assert!(matches!(
            load_records_from_file(&path, &mut app()),
            Err(LoadError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_load_records_surfaces_model_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("labels.json");
        fs::write(
            &path,
            r#"[
                {"key": "title", "translations": {"en": "Title"}},
                {"key": "title", "translations": {"en": "Other"}}
            ]"#,
        )
        .unwrap();

        assert!(matches!(
            load_records_from_file(&path, &mut app()),
            Err(LoadError::Model(LabelError::DuplicateDefaultCase { .. }))
        ));
    }

    #[test]
    fn test_load_labels_from_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("en.json"),
            r#"{
                "@metadata": {"authors": ["someone"]},
                "settings.title": "Settings",
                "settings.count": 3,
                "greeting(gender.female)": "Hello {{name}}"
            }"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("fr.json"),
            r#"{"settings.title": "Paramètres", "greeting(gender.female)": "Bonjour {{name}}"}"#,
        )
        .unwrap();
        fs::write(temp_dir.path().join("de.json"), r#"{"settings.title": "Einstellungen"}"#)
            .unwrap();

        let mut app = app();
        load_labels(temp_dir.path(), &mut app).unwrap();

        let labels = app.all_labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].key, "greeting");
        assert_eq!(labels[0].templated_values()[0].key, "name");
        let title = app.section.find_section("settings").unwrap().label("title").unwrap();
        assert_eq!(title.cases[0].translations.len(), 2);
        assert!(app.coverage_gaps().is_empty());
    }

    #[test]
    fn test_load_labels_from_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            load_labels_from_dir(&temp_dir.path().join("missing"), &mut app()),
            Err(LoadError::InvalidInput { .. })
        ));
    }
}
