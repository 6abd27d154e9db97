//! Read-only invocations handed to workers.

use std::fmt;
use std::ops::Deref;

use super::error::{ConfigError, ConfigResult};
use super::invocation::TestInvocationConfig;

/// A validated invocation that can no longer be mutated.
///
/// Built by [`TestInvocationConfig::finalize`]. Each worker of a pool gets its
/// own copy through [`FinalizedInvocation::for_worker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedInvocation {
    config: TestInvocationConfig,
}

impl FinalizedInvocation {
    pub(super) fn new(config: TestInvocationConfig) -> Self {
        Self { config }
    }

    /// A copy of this invocation owned by worker `thread_id`.
    pub fn for_worker(&self, thread_id: i64) -> ConfigResult<Self> {
        if thread_id < 0 {
            return Err(ConfigError::InvalidThreadId(thread_id));
        }
        let mut config = self.config.clone();
        config.thread_id = thread_id;
        tracing::debug!(suite = %config.suite_name, thread_id, "assigned invocation to worker");
        Ok(Self { config })
    }

    /// Give the record back for editing; it must be finalized again before dispatch.
    pub fn into_inner(self) -> TestInvocationConfig {
        self.config
    }
}

impl Deref for FinalizedInvocation {
    type Target = TestInvocationConfig;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}

impl fmt::Display for FinalizedInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.config, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunTimeTestConfig;

    #[test]
    fn test_finalize_default() {
        let finalized = TestInvocationConfig::new().finalize().unwrap();
        assert_eq!(finalized.thread_id, -1);
        assert_eq!(finalized.timeout_seconds, 3600);
    }

    #[test]
    fn test_finalize_rejects_invalid() {
        let mut config = TestInvocationConfig::new();
        config.thread_count = 0;
        assert!(config.finalize().is_err());
    }

    #[test]
    fn test_for_worker_copies_are_distinct() {
        let finalized = TestInvocationConfig::new().finalize().unwrap();
        let workers: Vec<_> = (0..3).map(|id| finalized.for_worker(id).unwrap()).collect();
        assert_eq!(workers[0].thread_id, 0);
        assert_eq!(workers[2].thread_id, 2);
        assert_ne!(workers[0], workers[1]);
        // The dispatcher's copy stays unassigned
        assert_eq!(finalized.thread_id, -1);
    }

    #[test]
    fn test_for_worker_rejects_negative_id() {
        let finalized = TestInvocationConfig::new().finalize().unwrap();
        assert!(matches!(finalized.for_worker(-1), Err(ConfigError::InvalidThreadId(-1))));
    }

    #[test]
    fn test_for_worker_keeps_run_time_config() {
        let finalized = TestInvocationConfig::new()
            .with_run_time_test_config(RunTimeTestConfig::new().with_timeout_seconds(30))
            .finalize()
            .unwrap();
        let worker = finalized.for_worker(4).unwrap();
        assert_eq!(worker.timeout_seconds, 30);
        assert!(worker.tested_run_time_config.is_some());
    }

    #[test]
    fn test_into_inner_roundtrip() {
        let config = TestInvocationConfig::new().with_command_line("tdvt show");
        let finalized = config.clone().finalize().unwrap();
        assert_eq!(finalized.to_string(), config.to_string());
        assert_eq!(finalized.into_inner(), config);
    }
}
