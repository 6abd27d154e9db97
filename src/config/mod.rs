//! Test-invocation configuration
//!
//! This module describes how a single tdvt test run is executed and how that
//! description is derived from competing sources.
//!
//! ## Modules
//!
//! - `invocation` - The invocation record and its layered constructors
//! - `args` - Command-line overrides
//! - `persisted` - The 11-key persisted document
//! - `runtime` - Suite-level runtime policy
//! - `finalized` - Read-only invocations handed to workers
//! - `error` - Construction and validation errors

mod args;
mod error;
mod finalized;
mod invocation;
mod persisted;
mod runtime;

pub use args::InvocationArgs;
pub use error::{ConfigError, ConfigResult};
pub use finalized::FinalizedInvocation;
pub use invocation::{
    DEFAULT_THREAD_COUNT, DEFAULT_TIMEOUT_SECONDS, InvocationSources, TestInvocationConfig, UNASSIGNED_THREAD_ID,
};
pub use persisted::{PERSISTED_KEYS, PersistedInvocation, read_json_document};
pub use runtime::{RunTimeTestConfig, TestConfig};
