//! Raw-mode / alternate-screen handling for the status screen.
//!
//! Harbor draws into the alternate screen so the user's shell scrollback is
//! left alone. Whatever path the process takes out (quit key, error, panic)
//! must put the terminal back into cooked mode on the primary screen.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type HarborTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Switches the terminal into raw mode on the alternate screen.
///
/// If a later step fails, the steps already taken are undone before the
/// error is returned; no `TuiRuntime` exists yet to do it on drop.
///
/// # Errors
/// Returns an error if raw mode, the alternate screen, or the ratatui
/// terminal cannot be set up.
pub fn enter() -> Result<HarborTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    rollback_on_failure(open_screen, || {
        let _ = restore();
    })
}

fn open_screen() -> Result<HarborTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn rollback_on_failure<T>(open: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    open().inspect_err(|_| undo())
}

/// Returns to the primary screen and leaves raw mode.
///
/// Both steps are attempted even if the first one fails.
///
/// # Errors
/// Returns the first error encountered.
pub fn restore() -> Result<()> {
    let screen = execute!(io::stdout(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen");
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    screen.and(raw)
}

/// Restores the terminal before the default panic message is printed, so the
/// message lands on a usable screen.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous(info);
    }));
}
