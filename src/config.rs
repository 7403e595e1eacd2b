use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app::{AppLabels, DEFAULT_APP_NAME};
use crate::error::{LoadError, LoadResult};

/// Generator configuration, usually read from a JSON file
///
/// ```json
/// {
///     "name": "AppLocalizations",
///     "languages": ["en", "fr"],
///     "input": "labels.json"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Root name, the first segment of every section path
    pub name: String,
    /// Supported languages, in output order
    pub languages: Vec<String>,
    /// Records file or directory of `<lang>.json` files
    pub input: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            name: DEFAULT_APP_NAME.to_string(),
            languages: Vec::new(),
            input: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a JSON file
    ///
    /// A relative `input` is resolved against the config file's directory.
    pub fn load(path: &Path) -> LoadResult<Self> {
        tracing::debug!("Loading configuration from: {:?}", path);
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: GeneratorConfig =
            serde_json::from_str(&content).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(dir) = path.parent() {
            config.input = config.input.take().map(|input| {
                if input.is_relative() {
                    dir.join(input)
                } else {
                    input
                }
            });
        }
        Ok(config)
    }

    /// Apply command line overrides on top of the loaded values
    pub fn merge_cli(
        &mut self,
        name: Option<String>,
        languages: Option<Vec<String>>,
        input: Option<PathBuf>,
    ) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(languages) = languages {
            self.languages = languages;
        }
        if input.is_some() {
            self.input = input;
        }
    }

    /// Declare the app root described by this configuration
    pub fn app_labels(&self) -> LoadResult<AppLabels> {
        Ok(AppLabels::new(&self.name, self.languages.clone())?)
    }
}
