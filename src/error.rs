//! Error types for building the label tree

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while inserting into the label tree or declaring the app root.
///
/// None of these are recoverable mid-construction: the tree may already hold
/// the offending case, so callers are expected to abort the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// Condition text is not of the form `<category>.<value>`
    #[error("Malformed condition '{text}': expected exactly one '.' as in 'category.value'")]
    ConditionFormat { text: String },

    /// A label already holds a case without a condition
    #[error("Label '{label}' has more than one default case")]
    DuplicateDefaultCase { label: String },

    /// Category conditions on one label use more than one category name
    #[error("Label '{label}' mixes categories '{first}' and '{other}'")]
    MixedCategory {
        label: String,
        first: String,
        other: String,
    },

    /// Translations or cases disagree on their placeholder sets
    #[error("Placeholder mismatch in label '{label}' ({condition}): {detail}")]
    PlaceholderMismatch {
        label: String,
        condition: String,
        detail: String,
    },

    /// Nothing left to insert after trimming the path
    #[error("Label path is empty")]
    EmptyPath,

    /// Path has empty segments or unbalanced condition parentheses
    #[error("Malformed label path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    /// Path carries a `(condition)` suffix and an explicit condition was passed as well
    #[error("Label path '{path}' has a condition suffix and an explicit condition")]
    ConflictingCondition { path: String },

    /// App root declared without any supported language
    #[error("At least one supported language is required")]
    NoLanguages,

    /// Supported language code is not a valid locale identifier
    #[error("Invalid language code '{code}': {reason}")]
    InvalidLanguage { code: String, reason: String },
}

/// Errors raised while reading configuration or label input from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid input '{}': {reason}", path.display())]
    InvalidInput { path: PathBuf, reason: String },

    #[error(transparent)]
    Model(#[from] LabelError),
}

/// Result type for tree operations
pub type LabelResult<T> = Result<T, LabelError>;

/// Result type for loading operations
pub type LoadResult<T> = Result<T, LoadError>;
