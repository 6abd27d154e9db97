//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use crate::config::{
    DEFAULT_TIMEOUT_SECONDS, FinalizedInvocation, InvocationArgs, InvocationSources, RunTimeTestConfig, TestConfig,
    TestInvocationConfig, read_json_document,
};
use crate::toolchain;

use super::{CliError, CliResult, ExitCode, InvocationFlags};

/// Build a finalized invocation from the command-line flags.
///
/// Sources are layered as defaults, flags, `--from-json`, then `--suite`.
pub fn build_invocation(flags: &InvocationFlags, command_line: &str) -> CliResult<FinalizedInvocation> {
    let args = InvocationArgs::from(flags);

    let json = match &flags.from_json {
        Some(path) => Some(read_json_document(path)?),
        None => None,
    };

    let test_config = flags.suite.as_ref().map(|suite| {
        let rtt = RunTimeTestConfig::new()
            .with_timeout_seconds(flags.timeout.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
            .with_d_override(flags.d_override.clone().unwrap_or_default())
            .with_run_as_perf(flags.perf);
        TestConfig::new(suite.clone(), rtt)
    });

    let sources = InvocationSources {
        args: Some(&args),
        json: json.as_ref(),
        test_config: test_config.as_ref(),
    };
    let finalized = TestInvocationConfig::from_sources(sources)?
        .with_command_line(command_line)
        .finalize()?;

    match flags.thread_id {
        Some(id) => Ok(finalized.for_worker(i64::from(id))?),
        None => Ok(finalized),
    }
}

/// Print an invocation as its summary line or as JSON.
pub fn show(flags: &InvocationFlags, json: bool, command_line: &str) -> CliResult<ExitCode> {
    let invocation = build_invocation(flags, command_line)?;
    tracing::info!(suite = %invocation.suite_name, thread_id = invocation.thread_id, "built invocation");

    if json {
        println!("{}", invocation.to_json_string()?);
    } else {
        println!("{}", invocation);
    }
    Ok(ExitCode::SUCCESS)
}

/// Write an invocation as a persisted JSON document.
pub fn export(flags: &InvocationFlags, out: &Path, command_line: &str) -> CliResult<ExitCode> {
    let invocation = build_invocation(flags, command_line)?;
    invocation.write_json_file(out)?;
    tracing::info!(path = %out.display(), suite = %invocation.suite_name, "wrote invocation");
    Ok(ExitCode::SUCCESS)
}

/// Check that `exe` is reachable on PATH.
pub fn check_env(exe: &str) -> CliResult<ExitCode> {
    if toolchain::check_executable_on_path(exe) {
        println!("{} found", exe);
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::failure(format!("Error: {} not found on PATH", exe)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_document(dir: &Path) -> PathBuf {
        let path = dir.join("invocation.json");
        fs::write(
            &path,
            r#"{
                "tested_sql": false,
                "tested_tuples": true,
                "output_dir": "out",
                "logical": true,
                "config_file": "",
                "suite_name": "from_json",
                "d_override": "",
                "verbose": false,
                "tds": "cast_calcs.tds",
                "noheader": false,
                "thread_count": 3
            }"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_build_default_invocation() {
        let invocation = build_invocation(&InvocationFlags::default(), "tdvt show").unwrap();
        assert_eq!(invocation.command_line, "tdvt show");
        assert_eq!(invocation.thread_id, -1);
        assert!(invocation.tested_run_time_config.is_none());
    }

    #[test]
    fn test_build_with_suite_policy() {
        let flags = InvocationFlags {
            suite: Some("oracle".to_string()),
            timeout: Some(45),
            perf: true,
            thread_id: Some(1),
            ..Default::default()
        };
        let invocation = build_invocation(&flags, "").unwrap();
        assert_eq!(invocation.suite_name, "oracle");
        assert_eq!(invocation.timeout_seconds, 45);
        assert!(invocation.run_as_perf);
        assert_eq!(invocation.thread_id, 1);
    }

    #[test]
    fn test_build_from_json_then_suite() {
        let dir = tempfile::tempdir().unwrap();
        let flags = InvocationFlags {
            from_json: Some(write_document(dir.path())),
            suite: Some("from_suite".to_string()),
            noclean: true,
            ..Default::default()
        };
        let invocation = build_invocation(&flags, "").unwrap();
        assert_eq!(invocation.suite_name, "from_suite");
        assert_eq!(invocation.tds, "cast_calcs.tds");
        assert_eq!(invocation.thread_count, 3);
        assert!(invocation.leave_temp_dir);
    }

    #[test]
    fn test_build_missing_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let flags = InvocationFlags {
            from_json: Some(dir.path().join("nope.json")),
            ..Default::default()
        };
        let err = build_invocation(&flags, "").unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("nope.json"));
    }

    #[test]
    fn test_build_rejects_zero_timeout() {
        let flags = InvocationFlags {
            suite: Some("s".to_string()),
            timeout: Some(0),
            ..Default::default()
        };
        let err = build_invocation(&flags, "").unwrap_err();
        assert!(err.message.contains("timeout_seconds"));
    }

    #[test]
    fn test_check_env_missing_executable_fails() {
        let err = check_env("tdvt-no-such-executable-7f3a").unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("tdvt-no-such-executable-7f3a not found on PATH"));
    }

    #[test]
    fn test_export_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("run.json");
        let flags = InvocationFlags {
            compare_sql: true,
            ..Default::default()
        };
        assert_eq!(export(&flags, &out, "").unwrap(), ExitCode::SUCCESS);

        let reloaded = TestInvocationConfig::read_json_file(&out).unwrap();
        assert!(reloaded.tested_sql);
    }
}
