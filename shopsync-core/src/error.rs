//! Error types for shopsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading or validating configuration.
///
/// Every variant is fatal at startup: no job runs without a valid config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure reading the config file.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with the offending file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The `SHOPIFY` environment variable held something other than valid JSON.
    #[error("invalid SHOPIFY configuration format in environment: {0}")]
    Env(#[from] serde_json::Error),

    /// No config source was found at all.
    #[error("configuration not found: set SHOPIFY or create {path}")]
    NotFound { path: PathBuf },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// One or more required fields are absent or empty.
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<String>),

    /// A field is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
