use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use super::help_line;
use crate::tui::action::{Action, Effect};
use crate::tui::screen::Screen;

/// Read-only error message. Dismissed with the global previous key, which
/// reveals the screen underneath unchanged.
pub struct ErrorScreen {
    message: String,
}

impl ErrorScreen {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Screen for ErrorScreen {
    fn update(&mut self, _action: Action) -> Effect {
        Effect::None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [body_area, help_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(Span::styled(
                " Error ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(Line::from(self.message.clone()))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, body_area);

        frame.render_widget(help_line(&[("Ctrl+D", "Back")]), help_area);
    }
}
