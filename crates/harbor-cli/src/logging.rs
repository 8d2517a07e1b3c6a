//! Logging setup.
//!
//! The TUI owns stdout, so logs go to `harbor-tui.log` in the system temp
//! directory. No subscriber is installed unless `RUST_LOG` is set.

use std::env;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "harbor-tui.log";

/// Installs the global subscriber when `RUST_LOG` asks for logs.
///
/// The returned guard flushes buffered log lines on drop; keep it alive
/// until the program exits.
///
/// # Errors
/// Returns an error if `RUST_LOG` is not a valid filter or the log file
/// cannot be opened.
pub fn init() -> Result<Option<WorkerGuard>> {
    let value = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let Some(filter) = parse_filter(&value)? else {
        return Ok(None);
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(env::temp_dir())
        .context("open log file")?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(Some(guard))
}

/// `None` means logging is off.
fn parse_filter(value: &str) -> Result<Option<EnvFilter>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    EnvFilter::try_new(value)
        .map(Some)
        .with_context(|| format!("invalid {} value '{value}'", EnvFilter::DEFAULT_ENV))
}
