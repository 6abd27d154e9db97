//! Suite-level policy that can override per-run defaults.
//!
//! A [`RunTimeTestConfig`] is a reusable bundle of timeout, override value and
//! perf-mode, usually owned by a [`TestConfig`] describing one named test suite.
//! Invocations derived from the same suite share the bundle through an [`Arc`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::invocation::DEFAULT_TIMEOUT_SECONDS;

/// Runtime sub-configuration applied on top of invocation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunTimeTestConfig {
    /// Max wall-clock seconds per test
    pub timeout_seconds: u64,
    /// Opaque runtime-parameter override passed through to the engine
    pub d_override: String,
    /// Run in performance-measurement mode
    pub run_as_perf: bool,
}

impl Default for RunTimeTestConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            d_override: String::new(),
            run_as_perf: false,
        }
    }
}

impl RunTimeTestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_d_override(mut self, value: impl Into<String>) -> Self {
        self.d_override = value.into();
        self
    }

    pub fn with_run_as_perf(mut self, perf: bool) -> Self {
        self.run_as_perf = perf;
        self
    }
}

/// A named test suite and the runtime policy it runs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    /// Data source name; becomes the invocation's suite name
    pub dsname: String,
    pub run_time_config: Arc<RunTimeTestConfig>,
}

impl TestConfig {
    pub fn new(dsname: impl Into<String>, run_time_config: impl Into<Arc<RunTimeTestConfig>>) -> Self {
        Self {
            dsname: dsname.into(),
            run_time_config: run_time_config.into(),
        }
    }
}
