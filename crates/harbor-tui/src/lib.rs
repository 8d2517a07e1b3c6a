//! Full-screen status display for Harbor.

pub mod effects;
pub mod events;
pub mod options;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
pub use options::AppOptions;
pub use runtime::TuiRuntime;

/// Runs the status display until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal or the terminal cannot be
/// set up, drawn to, or read from.
pub fn run(options: AppOptions) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!("Harbor-TUI requires a terminal.");
    }

    let mut runtime = TuiRuntime::new(options)?;
    runtime.run()
}
