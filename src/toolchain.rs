//! Locating external executables on `PATH`.

use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

const PATH_ENV: &str = "PATH";

/// Find `exe_name` in the directories listed by `PATH`.
pub fn find_executable(exe_name: &str) -> Option<PathBuf> {
    let paths = env::var_os(PATH_ENV)?;
    find_executable_in(&paths, exe_name)
}

/// Find `exe_name` in a platform-separated list of directories.
pub fn find_executable_in(paths: &OsStr, exe_name: &str) -> Option<PathBuf> {
    env::split_paths(paths)
        .map(|dir| dir.join(exe_name))
        .find(|candidate| candidate.is_file())
}

/// Check that `exe_name` is reachable, logging how to fix it when it is not.
pub fn check_executable_on_path(exe_name: &str) -> bool {
    let paths = env::var_os(PATH_ENV).unwrap_or_default();
    check_executable_in(&paths, exe_name)
}

/// [`check_executable_on_path`] against an explicit directory list.
pub fn check_executable_in(paths: &OsStr, exe_name: &str) -> bool {
    match find_executable_in(paths, exe_name) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "found {}", exe_name);
            true
        }
        None => {
            tracing::error!(
                "{} not found on PATH; install a Java JDK and add its bin directory to the PATH environment variable",
                exe_name
            );
            false
        }
    }
}
