//! The test-invocation configuration.
//!
//! A [`TestInvocationConfig`] describes exactly one test-suite invocation. It is
//! built by layering sources over the defaults, always in this order:
//!
//! 1. defaults ([`TestInvocationConfig::default`])
//! 2. command-line overrides ([`TestInvocationConfig::init_from_args`])
//! 3. a persisted document ([`TestInvocationConfig::init_from_json`])
//! 4. a test-suite descriptor ([`TestInvocationConfig::apply_test_config`])
//!
//! Once built, [`TestInvocationConfig::finalize`] checks the invariants and
//! freezes the record for dispatch to a worker.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use super::args::{InvocationArgs, is_set};
use super::error::{ConfigError, ConfigResult};
use super::finalized::FinalizedInvocation;
use super::persisted::{PersistedInvocation, read_json_document};
use super::runtime::{RunTimeTestConfig, TestConfig};

/// Default per-test wall-clock limit (one hour).
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60 * 60;
/// Default worker thread count.
pub const DEFAULT_THREAD_COUNT: usize = 6;
/// `thread_id` of an invocation not yet owned by a worker.
pub const UNASSIGNED_THREAD_ID: i64 = -1;

/// How a single tdvt test run is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestInvocationConfig {
    /// SQL-text comparison enabled
    pub tested_sql: bool,
    /// Result-tuple comparison enabled
    pub tested_tuples: bool,
    pub log_dir: String,
    pub output_dir: String,
    /// Max wall-clock seconds per test
    pub timeout_seconds: u64,
    /// Logical (as opposed to physical) test run
    pub logical: bool,
    /// Path to the test-definition file
    pub config_file: String,
    pub suite_name: String,
    /// Opaque runtime-parameter override
    pub d_override: String,
    pub verbose: bool,
    /// Original invocation string, for audit
    pub command_line: String,
    /// Suppress the header row in output
    pub noheader: bool,
    pub thread_count: usize,
    /// Skip cleanup of temp artifacts
    pub leave_temp_dir: bool,
    pub run_as_perf: bool,
    /// Owning worker, or [`UNASSIGNED_THREAD_ID`]
    pub thread_id: i64,
    /// Data-source descriptor under test
    pub tds: String,
    /// The run time config this invocation was derived from, if any
    pub tested_run_time_config: Option<Arc<RunTimeTestConfig>>,
}

impl Default for TestInvocationConfig {
    fn default() -> Self {
        Self {
            tested_sql: false,
            tested_tuples: true,
            log_dir: String::new(),
            output_dir: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            logical: false,
            config_file: String::new(),
            suite_name: String::new(),
            d_override: String::new(),
            verbose: false,
            command_line: String::new(),
            noheader: false,
            thread_count: DEFAULT_THREAD_COUNT,
            leave_temp_dir: false,
            run_as_perf: false,
            thread_id: UNASSIGNED_THREAD_ID,
            tds: String::new(),
            tested_run_time_config: None,
        }
    }
}

/// Sources to layer over the defaults in [`TestInvocationConfig::from_sources`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InvocationSources<'a> {
    pub args: Option<&'a InvocationArgs>,
    pub json: Option<&'a Value>,
    pub test_config: Option<&'a TestConfig>,
}

impl TestInvocationConfig {
    /// Create an invocation with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer every supplied source over the defaults in the fixed order.
    ///
    /// Fails only when a persisted document is supplied and is incomplete or
    /// malformed; nothing is returned in that case.
    pub fn from_sources(sources: InvocationSources<'_>) -> ConfigResult<Self> {
        let mut config = Self::default();
        if let Some(args) = sources.args {
            config.init_from_args(args);
        }
        if let Some(json) = sources.json {
            config.init_from_json(json)?;
        }
        if let Some(test_config) = sources.test_config {
            config.apply_test_config(test_config);
        }
        Ok(config)
    }

    /// Build an invocation from a persisted document alone.
    pub fn from_json_value(value: &Value) -> ConfigResult<Self> {
        Self::new().with_json(value)
    }

    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(&value)
    }

    /// Load a persisted invocation from disk.
    pub fn read_json_file(path: &Path) -> ConfigResult<Self> {
        let value = read_json_document(path)?;
        Self::from_json_value(&value)
    }

    /// Apply command-line overrides.
    ///
    /// Only flags that are present and set change anything, and only
    /// `tested_sql`, `tested_tuples`, `leave_temp_dir` and `verbose` are
    /// reachable from here.
    pub fn init_from_args(&mut self, args: &InvocationArgs) {
        if is_set(args.compare_sql) {
            self.tested_sql = true;
        }
        if is_set(args.nocompare_tuples) {
            self.tested_tuples = false;
        }
        if is_set(args.noclean) {
            self.leave_temp_dir = true;
        }
        if is_set(args.verbose) {
            self.verbose = true;
        }
        tracing::debug!(?args, "applied command-line overrides");
    }

    /// Overwrite the persisted fields from a document.
    ///
    /// The document is fully decoded first; on error the invocation is left untouched.
    pub fn init_from_json(&mut self, value: &Value) -> ConfigResult<()> {
        let persisted = PersistedInvocation::from_value(value)?;
        self.apply_persisted(persisted);
        Ok(())
    }

    pub fn apply_persisted(&mut self, persisted: PersistedInvocation) {
        self.tested_sql = persisted.tested_sql;
        self.tested_tuples = persisted.tested_tuples;
        self.output_dir = persisted.output_dir;
        self.logical = persisted.logical;
        self.config_file = persisted.config_file;
        self.suite_name = persisted.suite_name;
        self.d_override = persisted.d_override;
        self.verbose = persisted.verbose;
        self.tds = persisted.tds;
        self.noheader = persisted.noheader;
        self.thread_count = persisted.thread_count;
        tracing::debug!(suite = %self.suite_name, tds = %self.tds, "applied persisted invocation");
    }

    /// Adopt a run time config as the source of truth for timeout, override and perf-mode.
    pub fn set_run_time_test_config(&mut self, rtt: Arc<RunTimeTestConfig>) {
        self.timeout_seconds = rtt.timeout_seconds;
        self.d_override = rtt.d_override.clone();
        self.run_as_perf = rtt.run_as_perf;
        tracing::debug!(
            timeout_seconds = rtt.timeout_seconds,
            run_as_perf = rtt.run_as_perf,
            "applied run time config"
        );
        self.tested_run_time_config = Some(rtt);
    }

    /// Apply a test-suite descriptor: its run time config, then its name.
    pub fn apply_test_config(&mut self, test_config: &TestConfig) {
        self.set_run_time_test_config(Arc::clone(&test_config.run_time_config));
        self.suite_name = test_config.dsname.clone();
    }

    pub fn with_args(mut self, args: &InvocationArgs) -> Self {
        self.init_from_args(args);
        self
    }

    pub fn with_json(mut self, value: &Value) -> ConfigResult<Self> {
        self.init_from_json(value)?;
        Ok(self)
    }

    pub fn with_test_config(mut self, test_config: &TestConfig) -> Self {
        self.apply_test_config(test_config);
        self
    }

    pub fn with_run_time_test_config(mut self, rtt: impl Into<Arc<RunTimeTestConfig>>) -> Self {
        self.set_run_time_test_config(rtt.into());
        self
    }

    /// Record the original invocation string
    pub fn with_command_line(mut self, command_line: impl Into<String>) -> Self {
        self.command_line = command_line.into();
        self
    }

    /// The persisted subset of this invocation.
    pub fn to_persisted(&self) -> PersistedInvocation {
        PersistedInvocation {
            tested_sql: self.tested_sql,
            tested_tuples: self.tested_tuples,
            output_dir: self.output_dir.clone(),
            logical: self.logical,
            config_file: self.config_file.clone(),
            suite_name: self.suite_name.clone(),
            d_override: self.d_override.clone(),
            verbose: self.verbose,
            tds: self.tds.clone(),
            noheader: self.noheader,
            thread_count: self.thread_count,
        }
    }

    /// Export as a JSON object holding exactly the persisted keys.
    pub fn to_json_value(&self) -> ConfigResult<Value> {
        self.to_persisted().to_value()
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_persisted())?)
    }

    /// Persist the exported document to disk.
    pub fn write_json_file(&self, path: &Path) -> ConfigResult<()> {
        let text = self.to_json_string()?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the invariants a worker relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if self.thread_count == 0 {
            return Err(ConfigError::InvalidThreadCount(self.thread_count));
        }
        if let Some(rtt) = &self.tested_run_time_config {
            if rtt.timeout_seconds != self.timeout_seconds {
                return Err(ConfigError::RunTimeMismatch { field: "timeout_seconds" });
            }
            if rtt.d_override != self.d_override {
                return Err(ConfigError::RunTimeMismatch { field: "d_override" });
            }
            if rtt.run_as_perf != self.run_as_perf {
                return Err(ConfigError::RunTimeMismatch { field: "run_as_perf" });
            }
        }
        Ok(())
    }

    /// Validate and freeze this invocation for dispatch.
    pub fn finalize(self) -> ConfigResult<FinalizedInvocation> {
        if let Err(err) = self.validate() {
            tracing::warn!(suite = %self.suite_name, error = %err, "rejected invocation");
            return Err(err);
        }
        Ok(FinalizedInvocation::new(self))
    }
}

impl fmt::Display for TestInvocationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "suite [{}]: tested sql [{}]: tested tuples [{}]: output dir [{}]: logical [{}]: config file [{}]: override [{}]: tds [{}]: thread [{}]",
            self.suite_name,
            self.tested_sql,
            self.tested_tuples,
            self.output_dir,
            self.logical,
            self.config_file,
            self.d_override,
            self.tds,
            self.thread_count
        )
    }
}
