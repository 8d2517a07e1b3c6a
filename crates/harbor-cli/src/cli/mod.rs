//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use harbor_tui::AppOptions;

use crate::logging;

#[derive(Parser)]
#[command(name = "harbor-tui")]
#[command(version)]
#[command(about = "Show whether the Docker daemon is reachable, and which version it runs")]
struct Cli {}

pub fn run() -> Result<()> {
    let Cli {} = Cli::parse();

    let _log_guard = logging::init()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "harbor-tui starting");

    // The event loop blocks this thread; the probe runs on the runtime's workers.
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    let _rt_guard = rt.enter();

    let result = harbor_tui::run(AppOptions::default());
    match &result {
        Ok(()) => tracing::info!("harbor-tui exited"),
        Err(error) => tracing::error!(error = %format!("{error:#}"), "harbor-tui failed"),
    }
    result
}
