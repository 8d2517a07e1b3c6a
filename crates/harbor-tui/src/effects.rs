//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never spawns tasks or touches the terminal itself.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Probe the daemon once and report back with `UiEvent::ProbeCompleted`.
    ProbeDaemon,
}
