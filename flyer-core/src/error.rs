//! Error types for flyer-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::TemplateId;

/// Reasons a declared placeholder list is rejected by the schema resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The same placeholder name appears more than once.
    #[error("duplicate placeholder name '{0}'")]
    DuplicatePlaceholder(String),

    /// An entry that is not a string (number, null, object, ...).
    #[error("placeholder at position {index} is not a string")]
    NonStringPlaceholder { index: usize },

    /// `placeholders` was present but not a list.
    #[error("placeholders is not a list")]
    NotAList,

    /// An empty string cannot be used as a field key.
    #[error("placeholder at position {index} is empty")]
    EmptyPlaceholder { index: usize },
}

/// All errors that can arise from loading a local template catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML/JSON parse error on load, with the offending file path.
    #[error("failed to parse catalog at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The catalog file did not exist at the expected path.
    #[error("catalog not found at {path}")]
    NotFound { path: PathBuf },

    /// Two templates in one catalog share an id.
    #[error("duplicate template id '{id}' in {path}")]
    DuplicateId { id: TemplateId, path: PathBuf },
}

/// All errors that can arise from loading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, with the config file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    /// `dirs::home_dir()` returned `None`; cannot locate `~/.flyer/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
