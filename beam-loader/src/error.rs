//! Error types for the beam loading pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, parsing or building a beam
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("line {line}: malformed token '{token}': {reason}")]
    Format {
        line: u64,
        token: String,
        reason: String,
    },

    #[error("missing required beam attribute '{name}'")]
    MissingRequiredAttribute { name: &'static str },

    #[error("line {line}: {field} must be a number, found '{value}'")]
    NotNumeric {
        line: u64,
        field: String,
        value: String,
    },

    #[error("invalid beam attribute {name} = {value}: {reason}")]
    InvalidAttribute {
        name: &'static str,
        value: f64,
        reason: String,
    },

    #[error("line {line}: support at {location} is defined more than once")]
    DuplicateSupport { line: u64, location: f64 },

    #[error("support at {location} lies outside the beam (L = {length})")]
    SupportOutOfRange { location: f64, length: f64 },

    #[error("load #{index} ({kind}) at {location} lies outside the beam (L = {length})")]
    LoadOutOfRange {
        index: usize,
        kind: String,
        location: f64,
        length: f64,
    },

    #[error("load #{index} is invalid: {reason}")]
    InvalidLoad { index: usize, reason: String },

    #[error("input ended before the {section} line")]
    MissingSection { section: &'static str },

    #[error("unsupported schema version '{0}' (expected 1, 2 or 3)")]
    UnsupportedSchema(String),

    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("analysis engine rejected {operation}: {source}")]
    Engine {
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl LoaderError {
    pub(crate) fn format(line: u64, token: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn engine<E>(operation: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Engine {
            operation: operation.into(),
            source: Box::new(source),
        }
    }
}

/// Result type for the beam loading pipeline
pub type LoaderResult<T> = Result<T, LoaderError>;
