//! Error types for debug bundle reading.
//!
//! Every error is terminal for the current invocation; nothing is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for debug bundle operations.
pub type Result<T> = std::result::Result<T, DebugReadError>;

/// Main error type for debug bundle operations.
#[derive(Error, Debug)]
pub enum DebugReadError {
    // Configuration errors
    #[error("error reading consul-debug-read user config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error deserializing YAML contents of {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("empty or null {key} setting in {path:?}")]
    MissingConfigValue { path: PathBuf, key: &'static str },

    #[error("error writing consul-debug-read user config file {path:?}: {reason}")]
    ConfigWrite { path: PathBuf, reason: String },

    // Bundle errors
    #[error("failed to decode {path:?}: {reason}")]
    BundleDecode { path: PathBuf, reason: String },

    // Telemetry reference errors
    #[error("failed to fetch telemetry reference from {url}: {reason}")]
    NetworkFetch { url: String, reason: String },

    #[error("failed to parse telemetry reference document: {reason}")]
    HtmlParse { reason: String },

    #[error(
        "[metrics-name-validation] '{name}' not a valid telemetry metric name\n  visit: {url} for full list of consul telemetry metrics"
    )]
    NameValidation { name: String, url: String },

    // Extraction errors
    #[error("invalid metric name pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // Formatting errors
    #[error("unsupported type: {type_name}")]
    UnsupportedValueType { type_name: String },
}

impl DebugReadError {
    pub(crate) fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::BundleDecode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
