//! # Command Palette
//!
//! A filterable list of named commands. Typing narrows the list, Enter runs
//! the highlighted command's action.

use std::sync::Arc;

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::{help_line, truncate_str};
use crate::tui::action::{Action, Effect, Key};
use crate::tui::screen::Screen;

pub struct PaletteCommand {
    pub name: String,
    pub description: String,
    action: Arc<dyn Fn() -> Effect + Send + Sync>,
}

impl PaletteCommand {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        action: impl Fn() -> Effect + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            action: Arc::new(action),
        }
    }

    pub fn run(&self) -> Effect {
        (self.action)()
    }

    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.description.to_lowercase().contains(query)
    }
}

pub struct PaletteScreen {
    commands: Vec<PaletteCommand>,
    query: String,
    visible: Vec<usize>,
    state: ListState,
}

impl PaletteScreen {
    pub fn new(commands: Vec<PaletteCommand>) -> Self {
        let mut palette = Self {
            commands,
            query: String::new(),
            visible: Vec::new(),
            state: ListState::default(),
        };
        palette.apply_query();
        palette
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible_names(&self) -> Vec<&str> {
        self.visible
            .iter()
            .map(|&i| self.commands[i].name.as_str())
            .collect()
    }

    pub fn selected(&self) -> Option<&PaletteCommand> {
        self.state
            .selected()
            .and_then(|i| self.visible.get(i))
            .map(|&i| &self.commands[i])
    }

    fn apply_query(&mut self) {
        let query = self.query.to_lowercase();
        self.visible = self
            .commands
            .iter()
            .enumerate()
            .filter(|(_, c)| c.matches(&query))
            .map(|(i, _)| i)
            .collect();
        self.state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    /// Display columns taken by the widest command name.
    fn name_width(&self) -> usize {
        self.commands
            .iter()
            .map(|c| c.name.width())
            .max()
            .unwrap_or(0)
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() as isize - 1;
        let current = self.state.selected().unwrap_or(0) as isize;
        self.state
            .select(Some((current + delta).clamp(0, last) as usize));
    }
}

fn pad_to(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(padding))
}

impl Screen for PaletteScreen {
    fn update(&mut self, action: Action) -> Effect {
        let key = match action {
            Action::Key(key) => key,
            Action::Paste(text) => {
                self.query.push_str(&text);
                self.apply_query();
                return Effect::None;
            }
            _ => return Effect::None,
        };

        match key {
            Key::Up => self.move_selection(-1),
            Key::Down | Key::Tab => self.move_selection(1),
            Key::Char(c) => {
                self.query.push(c);
                self.apply_query();
            }
            Key::Backspace => {
                self.query.pop();
                self.apply_query();
            }
            Key::Esc => {
                self.query.clear();
                self.apply_query();
            }
            Key::Enter => {
                if let Some(command) = self.selected() {
                    debug!("Running palette command '{}'", command.name);
                    return command.run();
                }
            }
            _ => {}
        }
        Effect::None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [query_area, list_area, help_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let query = Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(self.query.clone()),
            Span::styled("█", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(query), query_area);

        if self.visible.is_empty() {
            frame.render_widget(
                Paragraph::new("No matching commands.").style(Style::default().fg(Color::DarkGray)),
                list_area,
            );
        } else {
            let name_width = self.name_width();
            let description_width = (list_area.width as usize).saturating_sub(name_width + 4);

            let items: Vec<ListItem> = self
                .visible
                .iter()
                .map(|&i| {
                    let command = &self.commands[i];
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            pad_to(&command.name, name_width),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("  "),
                        Span::styled(
                            truncate_str(&command.description, description_width),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, list_area, &mut self.state);
        }

        frame.render_widget(
            help_line(&[("Enter", "Run"), ("↑↓", "Move"), ("Esc", "Clear")]),
            help_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn palette() -> PaletteScreen {
        PaletteScreen::new(vec![
            PaletteCommand::new("jobs", "List jobs for this service", || {
                Effect::Print("jobs".into())
            }),
            PaletteCommand::new("restart", "Restart the resource", || {
                Effect::Print("restart".into())
            }),
            PaletteCommand::new("deploy", "Trigger a deploy", || {
                Effect::Print("deploy".into())
            }),
        ])
    }

    fn typed(palette: &mut PaletteScreen, text: &str) {
        for c in text.chars() {
            palette.update(Action::Key(Key::Char(c)));
        }
    }

    fn printed(effect: Effect) -> Option<String> {
        match effect {
            Effect::Print(s) => Some(s),
            _ => None,
        }
    }

    #[test]
    fn test_shows_all_commands_initially() {
        let palette = palette();
        assert_eq!(palette.visible_names(), ["jobs", "restart", "deploy"]);
        assert_eq!(palette.selected().map(|c| c.name.as_str()), Some("jobs"));
    }

    #[test]
    fn test_typing_filters_by_name_and_description() {
        let mut palette = palette();
        typed(&mut palette, "RES");
        assert_eq!(palette.visible_names(), ["restart"]);

        palette.update(Action::Key(Key::Esc));
        typed(&mut palette, "service");
        assert_eq!(palette.visible_names(), ["jobs"]);
    }

    #[test]
    fn test_enter_runs_highlighted_command() {
        let mut palette = palette();
        palette.update(Action::Key(Key::Down));
        palette.update(Action::Key(Key::Down));
        let effect = palette.update(Action::Key(Key::Enter));
        assert_eq!(printed(effect).as_deref(), Some("deploy"));
    }

    #[test]
    fn test_enter_with_no_match_does_nothing() {
        let mut palette = palette();
        typed(&mut palette, "zzz");
        assert!(palette.visible_names().is_empty());
        assert!(palette.update(Action::Key(Key::Enter)).is_none());
    }

    #[test]
    fn test_paste_extends_query() {
        let mut palette = palette();
        palette.update(Action::Paste("rest".to_string()));
        assert_eq!(palette.query(), "rest");
        assert_eq!(palette.visible_names(), ["restart"]);
    }

    #[test]
    fn test_backspace_widens_filter() {
        let mut palette = palette();
        typed(&mut palette, "dex");
        assert!(palette.visible_names().is_empty());
        palette.update(Action::Key(Key::Backspace));
        assert_eq!(palette.query(), "de");
        assert_eq!(palette.visible_names(), ["deploy"]);
    }

    #[test]
    fn test_name_width_counts_display_columns() {
        let palette = PaletteScreen::new(vec![
            PaletteCommand::new("デプロイ", "Wide name", || Effect::None),
            PaletteCommand::new("jobs", "Narrow name", || Effect::None),
        ]);
        assert_eq!(palette.name_width(), 8);
        assert_eq!(pad_to("jobs", 8), "jobs    ");
        assert_eq!(pad_to("デプロイ", 8), "デプロイ");
    }

    #[test]
    fn test_render_lists_commands() {
        let mut palette = palette();
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal.draw(|f| palette.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("restart"));
        assert!(text.contains("Trigger a deploy"));
    }
}
