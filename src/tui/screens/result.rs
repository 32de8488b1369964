use log::info;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};

use super::help_line;
use crate::tui::action::{Action, Effect, Key};
use crate::tui::loader::Loader;
use crate::tui::screen::Screen;

/// Runs a one-shot operation (restart, deploy, cancel) and shows the
/// message it produced. Enter finishes the screen with that message.
///
/// The operation runs on the first `init` only; uncovering the screen again
/// does not repeat a mutation.
pub struct ResultScreen {
    loader: Loader<String>,
    started: bool,
    message: Option<String>,
}

impl ResultScreen {
    pub fn new(loader: Loader<String>) -> Self {
        Self {
            loader,
            started: false,
            message: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Screen for ResultScreen {
    fn init(&mut self) -> Effect {
        if self.started {
            return Effect::None;
        }
        self.started = true;
        self.loader.start()
    }

    fn update(&mut self, action: Action) -> Effect {
        match action {
            Action::Loaded { id, payload } => {
                if let Some(message) = self.loader.accept(id, payload) {
                    info!("{message}");
                    self.message = Some(message);
                }
                Effect::None
            }
            Action::Key(Key::Enter) => Effect::Emit(Action::Done(
                self.message
                    .clone()
                    .unwrap_or_else(|| "Operation did not complete".to_string()),
            )),
            _ => Effect::None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [body_area, help_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let body = match &self.message {
            Some(message) => Paragraph::new(message.clone()).style(Style::default().fg(Color::Green)),
            None => Paragraph::new("Waiting for result...").style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(body.wrap(Wrap { trim: true }), body_area);
        frame.render_widget(help_line(&[("Enter", "Done")]), help_area);
    }
}
