//! Localization label tree
//!
//! Turns flat rows of dotted label paths, optional conditions and per-language
//! strings into a tree of sections and labels. Each label carries one or more
//! conditional cases, and each case the placeholders (`{{name}}`,
//! `{{count:int}}`) found in its translations. Code generators walk the
//! finished tree to emit typed accessors.
//!
//! ```
//! use label_tree::{AppLabels, Translation};
//!
//! let mut app = AppLabels::new("AppLocalizations", vec!["en".to_string()]).unwrap();
//! app.insert(
//!     "inbox.unread(plural.one)",
//!     None,
//!     vec![Translation::new("en", "{{count:int}} unread message")],
//! )
//! .unwrap();
//! app.insert(
//!     "inbox.unread(plural.other)",
//!     None,
//!     vec![Translation::new("en", "{{count:int}} unread messages")],
//! )
//! .unwrap();
//!
//! assert_eq!(app.all_labels().len(), 1);
//! assert_eq!(app.categories()[0].values, vec!["one", "other"]);
//! ```

pub mod app;
pub mod casing;
pub mod condition;
pub mod config;
pub mod error;
pub mod label;
pub mod loader;
pub mod placeholder;
pub mod section;


// Re-export the model for convenient access
pub use app::{AppLabels, CoverageGap, DEFAULT_APP_NAME};
pub use condition::{Category, Condition};
pub use config::GeneratorConfig;
pub use error::{LabelError, LabelResult, LoadError, LoadResult};
pub use label::{Case, Label, Translation};
pub use loader::{LabelRecord, load_labels, load_labels_from_dir, load_records_from_file};
pub use placeholder::{TemplatedValue, ValueType, extract_templated_values};
pub use section::{LabelPath, Section};
