//! Subscriber setup: stdout in the configured format plus a rotating plain-text file.

use std::path::Path;

use thiserror::Error;
use tracing::Subscriber;
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    util::TryInitError, EnvFilter, Layer,
};

const LOG_FILE_PREFIX: &str = "app";
const LOG_FILE_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory")]
    Dir(#[from] std::io::Error),

    #[error("failed to open log file")]
    Appender(#[from] InitError),

    #[error("logging already initialised")]
    Init(#[from] TryInitError),
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` filter.
///
/// The returned guard flushes the file writer on drop, so it must live as long as the
/// process does.
pub fn init(format: LogFormat, log_dir: &Path) -> Result<WorkerGuard, LoggingError> {
    let (writer, guard) = file_writer(log_dir)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout = match format {
        LogFormat::Compact => fmt::layer().compact().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout)
        .with(file_layer(writer))
        .try_init()?;

    Ok(guard)
}

/// Non-blocking writer over `{log_dir}/app.*.log`, rotated daily, keeping the newest
/// three files.
pub fn file_writer(log_dir: &Path) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    std::fs::create_dir_all(log_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)?;

    Ok(tracing_appender::non_blocking(appender))
}

pub fn file_layer<S>(writer: NonBlocking) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(writer)
}
