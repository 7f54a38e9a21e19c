//! Subscriber setup for the `curator` binary.
//!
//! Responsibilities:
//! - Install the global `tracing` subscriber from the resolved `LoggingConfig`.
//!
//! Does NOT handle:
//! - Choosing the level or format (file, env and flags are merged by `ConfigLoader`).
//!
//! Invariants:
//! - Installed once, before any command runs.
//! - Log lines never go to stdout; stdout is reserved for command output.
//! - With a logfile, the returned guard must be dropped before the process
//!   exits or buffered lines are lost.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use curator_config::{ConfigError, LogFormat, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Build the level filter for `config`.
pub(crate) fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(config.filter_directive()).map_err(|e| ConfigError::InvalidValue {
        var: "loglevel".to_string(),
        message: format!("'{}': {e}", config.loglevel),
    })
}

/// An appender that writes (and appends) to exactly `path`.
fn file_appender(path: &Path) -> Result<RollingFileAppender, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        var: "logfile".to_string(),
        message,
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| invalid(format!("{} is not a file path", path.display())))?;
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| invalid(format!("unable to open {}: {e}", path.display())))
}

/// Install the global subscriber.
pub(crate) fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(config)?;

    let (writer, guard) = match &config.logfile {
        Some(path) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(path)?);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.logformat {
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
        LogFormat::Default => fmt::layer()
            .with_ansi(config.logfile.is_none() && std::io::stderr().is_terminal())
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .context("Failed to install the log subscriber")?;
    Ok(guard)
}
