//! UI event types.
//!
//! All inputs to the display loop are converted to `UiEvent` before they
//! reach the reducer. Async results arrive through the runtime's inbox.

use crossterm::event::Event as CrosstermEvent;
use harbor_core::DaemonInfo;

/// Unified event enum for the TUI.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Raw terminal input (keys, resize).
    Terminal(CrosstermEvent),

    /// The daemon probe finished. Errors are already rendered to a string.
    ProbeCompleted(Result<DaemonInfo, String>),
}
