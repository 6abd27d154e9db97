//! Structured logging bootstrap.
//!
//! The console (stderr) shows INFO and above, or DEBUG and above in verbose
//! mode; `RUST_LOG` overrides that default. When a log file is given it is
//! truncated and receives everything at DEBUG and above.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::version::TDVT_VERSION;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Default console level for the given verbosity.
pub fn console_level(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO }
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed; the existing one
/// is kept and the log file is left untouched.
pub fn init_logging(log_path: Option<&Path>, verbose: bool) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let console_filter = EnvFilter::builder()
        .with_default_directive(console_level(verbose).into())
        .from_env_lossy();
    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let file = match log_path {
        Some(path) => {
            let file = File::create(path).map_err(|source| LoggingError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    let installed = tracing_subscriber::registry().with(console).with(file).try_init().is_ok();
    if installed {
        tracing::debug!(version = TDVT_VERSION, "starting tdvt");
    }
    Ok(installed)
}
