//! The persisted-invocation document.
//!
//! Other tooling in the harness reads and writes these documents, so the key
//! set is fixed: exactly [`PERSISTED_KEYS`], all required on import and all
//! emitted on export. Fields of the invocation outside this set (`log_dir`,
//! `timeout_seconds`, `command_line`, `leave_temp_dir`, `run_as_perf`,
//! `thread_id`, the run time config) are neither read nor written, so an
//! export followed by an import is not lossless.
//!
//! Import is all-or-nothing: the whole document is decoded into a
//! [`PersistedInvocation`] before anything is applied to an invocation.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::{ConfigError, ConfigResult};

/// Keys of a persisted invocation, in export order (field order of [`PersistedInvocation`]).
pub const PERSISTED_KEYS: [&str; 11] = [
    "tested_sql",
    "tested_tuples",
    "output_dir",
    "logical",
    "config_file",
    "suite_name",
    "d_override",
    "verbose",
    "tds",
    "noheader",
    "thread_count",
];

/// Decoded form of a persisted invocation document.
///
/// The derived `Serialize` is the export schema; field order must follow [`PERSISTED_KEYS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistedInvocation {
    pub tested_sql: bool,
    pub tested_tuples: bool,
    pub output_dir: String,
    pub logical: bool,
    pub config_file: String,
    pub suite_name: String,
    pub d_override: String,
    pub verbose: bool,
    pub tds: String,
    pub noheader: bool,
    pub thread_count: usize,
}

impl PersistedInvocation {
    /// Decode a document, failing on the first missing key in [`PERSISTED_KEYS`] order.
    ///
    /// Missing keys are reported before type errors so a truncated document
    /// always names what it lacks. Unknown keys are ignored.
    pub fn from_value(value: &Value) -> ConfigResult<Self> {
        let map = value.as_object().ok_or(ConfigError::NotAnObject)?;

        if let Some(&field) = PERSISTED_KEYS.iter().find(|key| !map.contains_key(**key)) {
            return Err(ConfigError::MissingField { field });
        }

        Ok(Self {
            tested_sql: required(map, "tested_sql")?,
            tested_tuples: required(map, "tested_tuples")?,
            output_dir: required(map, "output_dir")?,
            logical: required(map, "logical")?,
            config_file: required(map, "config_file")?,
            suite_name: required(map, "suite_name")?,
            d_override: required(map, "d_override")?,
            verbose: required(map, "verbose")?,
            tds: required(map, "tds")?,
            noheader: required(map, "noheader")?,
            thread_count: required(map, "thread_count")?,
        })
    }

    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn to_value(&self) -> ConfigResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn required<T: DeserializeOwned>(map: &Map<String, Value>, field: &'static str) -> ConfigResult<T> {
    let value = map.get(field).ok_or(ConfigError::MissingField { field })?;
    T::deserialize(value).map_err(|source| ConfigError::InvalidField { field, source })
}

/// Read a JSON document from disk without interpreting it.
pub fn read_json_document(path: &Path) -> ConfigResult<Value> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}
