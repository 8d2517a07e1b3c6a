//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `init` once, then
//! `update(app, event)` for every event, and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;

/// Startup hook.
///
/// Requests the daemon probe the first time it is called. The probe is never
/// requested again for the lifetime of the state.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    if app.probe_requested {
        return vec![];
    }
    app.probe_requested = true;
    vec![UiEffect::ProbeDaemon]
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::ProbeCompleted(result) => {
            app.status.apply_probe_result(result);
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(key),
        Event::Resize(width, height) => {
            app.status.resize(width, height);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    if is_quit_key(key) {
        return vec![UiEffect::Quit];
    }
    vec![]
}

fn is_quit_key(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT),
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
