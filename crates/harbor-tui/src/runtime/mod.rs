//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! The runtime is split in two. `RuntimeCore` holds the state, options and
//! inbox, and does effect dispatch; it never touches the terminal. `TuiRuntime`
//! wraps it with the terminal, the draw step, and crossterm polling.
//!
//! ## Inbox Pattern
//!
//! Spawned handlers send their `UiEvent` to the inbox sender. The runtime
//! drains the receiver each iteration, so async results enter the reducer one
//! at a time alongside terminal input.

pub(crate) mod handlers;

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::options::AppOptions;
use crate::state::AppState;
use crate::terminal::{self, HarborTerminal};
use crate::{render, update};

/// How long to block on terminal input before checking the inbox again.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Terminal-free half of the runtime: state, options, inbox, effect dispatch.
pub struct RuntimeCore {
    pub state: AppState,
    options: AppOptions,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
}

impl RuntimeCore {
    pub fn new(options: AppOptions) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(),
            options,
            inbox_tx,
            inbox_rx,
        }
    }

    /// Records the initial viewport and runs the reducer's `init` hook.
    ///
    /// Must be called from within a tokio runtime; the probe is spawned on it.
    pub fn start(&mut self, width: u16, height: u16) {
        self.dispatch_event(UiEvent::Terminal(Event::Resize(width, height)));
        let effects = update::init(&mut self.state);
        self.execute_effects(effects);
    }

    /// Takes every event currently waiting in the inbox.
    fn drain_inbox(&mut self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }
        events
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async effect and sends its result event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                tracing::info!("quit requested");
                self.state.should_quit = true;
            }
            UiEffect::ProbeDaemon => {
                let probe = self.options.probe.clone();
                let timeout = self.options.probe_timeout;
                self.spawn_effect(move || handlers::probe_daemon(probe, timeout));
            }
        }
    }
}

/// Full-screen TUI runtime.
///
/// Owns the terminal and the `RuntimeCore`. The terminal is restored on drop
/// and, through the panic hook, on panic.
pub struct TuiRuntime {
    terminal: HarborTerminal,
    pub core: RuntimeCore,
}

impl TuiRuntime {
    /// Creates a new TUI runtime and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(options: AppOptions) -> Result<Self> {
        // Hook first, so a panic during setup still restores the terminal
        terminal::install_panic_hook();

        let terminal = terminal::enter().context("Failed to setup terminal")?;
        Ok(Self {
            terminal,
            core: RuntimeCore::new(options),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// Must be called from within a tokio runtime; the probe is spawned on it.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal input fails.
    pub fn run(&mut self) -> Result<()> {
        let size = self.terminal.size().context("Failed to read terminal size")?;
        self.core.start(size.width, size.height);

        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.core.state.should_quit {
            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.core.state, frame);
                })?;
                dirty = false;
            }

            let events = self.collect_events()?;
            for event in events {
                dirty = true;
                self.core.dispatch_event(event);
                if self.core.state.should_quit {
                    break;
                }
            }
        }

        tracing::debug!("event loop finished");
        Ok(())
    }

    /// Collects events from the inbox and the terminal.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = self.core.drain_inbox();

        // Don't block on input when there is already something to process
        let poll_duration = if events.is_empty() {
            IDLE_POLL_DURATION
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration).context("Failed to poll terminal events")? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        Ok(events)
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore();
    }
}
