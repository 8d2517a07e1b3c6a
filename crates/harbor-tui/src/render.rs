//! Pure view/render functions for the TUI.
//!
//! Functions here take state by immutable reference, draw to a ratatui
//! `Frame`, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::{AppState, DisplayState};

const TITLE: &str = "Harbor-TUI: ratatui + Docker";
const FOOTER: &str = "Press 'q' to quit.";
const STATUS_CONNECTED: &str = "CONNECTED";
const STATUS_NOT_CONNECTED: &str = "NOT CONNECTED";

/// Text content of the status screen, derived from `DisplayState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub title: &'static str,
    pub status_line: &'static str,
    pub info_line: String,
    pub footer: &'static str,
}

impl StatusView {
    pub fn from_state(state: &DisplayState) -> Self {
        let (status_line, info_line) = if state.connected {
            (
                STATUS_CONNECTED,
                format!("Docker {} ({})", state.server_version, state.platform),
            )
        } else if let Some(error) = state.error_message.as_deref() {
            (STATUS_NOT_CONNECTED, format!("error: {error}"))
        } else {
            (STATUS_NOT_CONNECTED, String::new())
        };

        Self {
            title: TITLE,
            status_line,
            info_line,
            footer: FOOTER,
        }
    }

    fn lines(&self, connected: bool) -> Vec<Line<'_>> {
        let status_color = if connected { Color::Green } else { Color::Red };
        vec![
            Line::default(),
            Line::from(Span::styled(
                self.title,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::raw("Status: "),
                Span::styled(
                    self.status_line,
                    Style::default()
                        .fg(status_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(self.info_line.as_str()),
            Line::default(),
            Line::from(Span::styled(
                self.footer,
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }
}

/// Renders the status screen to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let view = StatusView::from_state(&app.status);
    let paragraph = Paragraph::new(view.lines(app.status.connected));
    frame.render_widget(paragraph, frame.area());
}
