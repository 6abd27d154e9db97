//! Errors raised while building, importing or finalizing an invocation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while constructing a [`TestInvocationConfig`](super::TestInvocationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A persisted document lacks one of the required keys.
    #[error("persisted invocation is missing required field `{field}`")]
    MissingField { field: &'static str },

    /// A required key is present but its value has the wrong JSON type.
    #[error("persisted invocation has an invalid value for `{field}`: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("persisted invocation must be a JSON object")]
    NotAnObject,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("timeout_seconds must be greater than zero")]
    InvalidTimeout,

    #[error("thread_count must be at least 1, got {0}")]
    InvalidThreadCount(usize),

    #[error("thread_id must be zero or greater, got {0}")]
    InvalidThreadId(i64),

    /// A field owned by the attached run time config was changed after it was applied.
    #[error("`{field}` no longer matches the attached run time config")]
    RunTimeMismatch { field: &'static str },
}

impl ConfigError {
    /// The persisted key this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::MissingField { field }
            | ConfigError::InvalidField { field, .. }
            | ConfigError::RunTimeMismatch { field } => Some(*field),
            _ => None,
        }
    }
}

/// Result type for invocation configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
