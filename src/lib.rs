#![forbid(unsafe_code)]
//! tdvt test invocation configuration
//!
//! tdvt validates SQL/database connectors by running test suites against them.
//! This crate provides the piece every run starts from: the invocation record
//! describing what to test, how long to allow it, where output goes and how
//! many workers to use, together with the layering rules that derive it from
//! defaults, command-line flags, persisted JSON documents and suite policies.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod logging;
pub mod toolchain;
pub mod version;

pub use config::{
    ConfigError, FinalizedInvocation, InvocationArgs, InvocationSources, RunTimeTestConfig, TestConfig,
    TestInvocationConfig,
};
