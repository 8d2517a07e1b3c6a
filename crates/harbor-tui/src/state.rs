//! Application state.
//!
//! ```text
//! AppState
//! ├── status: DisplayState   (connection status, viewport)
//! ├── should_quit: bool      (set by the Quit effect)
//! └── probe_requested: bool  (single-probe guard)
//! ```

use harbor_core::DaemonInfo;

/// Connection status shown on screen.
///
/// Starts out neither connected nor errored. `connected` and
/// `error_message` are never set at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub connected: bool,
    pub error_message: Option<String>,
    pub server_version: String,
    pub platform: String,
    /// Last known terminal size (width, height).
    pub viewport: (u16, u16),
}

impl DisplayState {
    pub fn apply_probe_result(&mut self, result: Result<DaemonInfo, String>) {
        match result {
            Ok(info) => {
                self.connected = true;
                self.error_message = None;
                self.server_version = info.version;
                self.platform = info.platform;
            }
            Err(message) => {
                self.connected = false;
                self.error_message = Some(message);
                self.server_version.clear();
                self.platform.clear();
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }
}

/// Top-level state owned by the runtime.
#[derive(Debug, Default)]
pub struct AppState {
    pub status: DisplayState,
    pub should_quit: bool,
    pub probe_requested: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
