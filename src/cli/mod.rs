//! CLI module for tdvt
//!
//! ## Commands
//!
//! - `show` - Build an invocation and print it
//! - `export --out <file>` - Build an invocation and persist it as JSON
//! - `check-env <exe>` - Check that an executable is reachable on PATH
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigError, InvocationArgs};
use crate::logging;
use crate::version::TDVT_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::failure(format!("Error: {}", err))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Test invocation tooling for the tdvt connector harness
#[derive(Parser, Debug)]
#[command(name = "tdvt")]
#[command(version = TDVT_VERSION)]
#[command(about = "Test invocation tooling for the tdvt connector harness", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Also write DEBUG-level logs to this file (truncated)
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an invocation and print it
    Show {
        #[command(flatten)]
        flags: InvocationFlags,
        /// Print the persisted JSON document instead of the summary line
        #[arg(long)]
        json: bool,
    },

    /// Build an invocation and write it as a persisted JSON document
    Export {
        #[command(flatten)]
        flags: InvocationFlags,
        /// Destination file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Check that an executable is reachable on PATH
    CheckEnv {
        /// Executable name (e.g. jar)
        #[arg(value_name = "EXE")]
        exe: String,
    },
}

/// Flags shared by every command that builds an invocation.
#[derive(Args, Debug, Clone, Default)]
pub struct InvocationFlags {
    /// Compare generated SQL text
    #[arg(long = "compare-sql")]
    pub compare_sql: bool,
    /// Skip result-tuple comparison
    #[arg(long = "nocompare-tuples")]
    pub nocompare_tuples: bool,
    /// Leave temp artifacts behind
    #[arg(long)]
    pub noclean: bool,
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
    /// Start from a persisted invocation document
    #[arg(long = "from-json", value_name = "FILE")]
    pub from_json: Option<PathBuf>,
    /// Name of the test suite to run
    #[arg(long = "suite", value_name = "NAME")]
    pub suite: Option<String>,
    /// Per-test timeout for the suite, in seconds
    #[arg(long = "timeout", value_name = "SECS", requires = "suite")]
    pub timeout: Option<u64>,
    /// Runtime-parameter override for the suite
    #[arg(long = "d-override", value_name = "VALUE", requires = "suite", allow_hyphen_values = true)]
    pub d_override: Option<String>,
    /// Run the suite in performance-measurement mode
    #[arg(long, requires = "suite")]
    pub perf: bool,
    /// Assign the invocation to a worker thread
    #[arg(long = "thread-id", value_name = "N")]
    pub thread_id: Option<u32>,
}

impl From<&InvocationFlags> for InvocationArgs {
    fn from(flags: &InvocationFlags) -> Self {
        // Unset clap flags map to "absent" so they never override anything
        let present = |set: bool| set.then_some(true);
        InvocationArgs {
            compare_sql: present(flags.compare_sql),
            nocompare_tuples: present(flags.nocompare_tuples),
            noclean: present(flags.noclean),
            verbose: present(flags.verbose),
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    // Non-UTF-8 arguments (e.g. paths) are valid; keep a lossy copy for the audit string
    let command_line = env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let cli = Cli::parse();

    match execute(cli, &command_line) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli, command_line: &str) -> CliResult<ExitCode> {
    let verbose = match &cli.command {
        Command::Show { flags, .. } | Command::Export { flags, .. } => flags.verbose,
        Command::CheckEnv { .. } => false,
    };
    logging::init_logging(cli.log_file.as_deref(), verbose)
        .map_err(|e| CliError::failure(format!("Error: {}", e)))?;

    match cli.command {
        Command::Show { flags, json } => commands::show(&flags, json, command_line),
        Command::Export { flags, out } => commands::export(&flags, &out, command_line),
        Command::CheckEnv { exe } => commands::check_env(&exe),
    }
}

// ============================================================================
// Tests
// ============================================================================
