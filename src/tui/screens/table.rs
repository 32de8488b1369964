//! # Table Screen
//!
//! Loads a list of rows through a [`Loader`] and lets the user filter and
//! pick one. What happens on selection is supplied by the caller, so the
//! same screen serves services, jobs and workspaces.
//!
//! Keys:
//! - `↑`/`k`, `↓`/`j`, PageUp/PageDown, Home/End move the selection
//! - `/` starts filtering; typed characters narrow the rows, Enter keeps
//!   the filter, Esc drops it
//! - Enter runs the select action on the highlighted row
//! - custom single-character options (e.g. `w`) run their own action

use std::sync::Arc;

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Row, Table, TableState};

use super::help_line;
use crate::tui::action::{Action, Effect, Key};
use crate::tui::loader::Loader;
use crate::tui::screen::Screen;

/// Rows taken by the table header and the help line.
const CHROME_HEIGHT: u16 = 2;

pub struct Column {
    pub title: &'static str,
    pub width: Constraint,
}

impl Column {
    pub fn fixed(title: &'static str, width: u16) -> Self {
        Self {
            title,
            width: Constraint::Length(width),
        }
    }

    /// Shares leftover width with other flex columns by `weight`.
    pub fn flex(title: &'static str, weight: u16) -> Self {
        Self {
            title,
            width: Constraint::Fill(weight),
        }
    }
}

type SelectFn<T> = Arc<dyn Fn(&T) -> Effect + Send + Sync>;
type OptionFn<T> = Arc<dyn Fn(Option<&T>) -> Effect + Send + Sync>;

struct CustomOption<T> {
    key: char,
    title: String,
    action: OptionFn<T>,
}

pub struct TableScreen<T> {
    loader: Loader<Vec<T>>,
    columns: Vec<Column>,
    format_row: fn(&T) -> Vec<String>,
    filter_row: Option<fn(&T, &str) -> bool>,
    on_select: Option<SelectFn<T>>,
    options: Vec<CustomOption<T>>,
    rows: Vec<T>,
    loaded: bool,
    /// Indices into `rows` that pass the filter, in row order.
    visible: Vec<usize>,
    filter: String,
    filtering: bool,
    state: TableState,
    page_size: u16,
}

impl<T: Send + 'static> TableScreen<T> {
    pub fn new(loader: Loader<Vec<T>>, columns: Vec<Column>, format_row: fn(&T) -> Vec<String>) -> Self {
        Self {
            loader,
            columns,
            format_row,
            filter_row: None,
            on_select: None,
            options: Vec::new(),
            rows: Vec::new(),
            loaded: false,
            visible: Vec::new(),
            filter: String::new(),
            filtering: false,
            state: TableState::default(),
            page_size: 10,
        }
    }

    /// Replaces the default filter (substring match on the formatted cells).
    /// The filter text is passed lowercased.
    pub fn with_filter(mut self, filter: fn(&T, &str) -> bool) -> Self {
        self.filter_row = Some(filter);
        self
    }

    pub fn on_select(mut self, action: impl Fn(&T) -> Effect + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(action));
        self
    }

    /// Adds a single-key action. It receives the highlighted row, if any.
    pub fn with_option(
        mut self,
        key: char,
        title: impl Into<String>,
        action: impl Fn(Option<&T>) -> Effect + Send + Sync + 'static,
    ) -> Self {
        self.options.push(CustomOption {
            key,
            title: title.into(),
            action: Arc::new(action),
        });
        self
    }

    pub fn selected(&self) -> Option<&T> {
        self.state
            .selected()
            .and_then(|i| self.visible.get(i))
            .and_then(|&idx| self.rows.get(idx))
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().filter_map(|&idx| self.rows.get(idx))
    }

    fn matches(&self, row: &T, filter: &str) -> bool {
        match self.filter_row {
            Some(f) => f(row, filter),
            None => (self.format_row)(row)
                .iter()
                .any(|cell| cell.to_lowercase().contains(filter)),
        }
    }

    fn apply_filter(&mut self) {
        let filter = self.filter.to_lowercase();
        self.visible = (0..self.rows.len())
            .filter(|&i| filter.is_empty() || self.matches(&self.rows[i], &filter))
            .collect();

        let selection = if self.visible.is_empty() {
            None
        } else {
            Some(self.state.selected().unwrap_or(0).min(self.visible.len() - 1))
        };
        self.state.select(selection);
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() as isize - 1;
        let current = self.state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, last);
        self.state.select(Some(next as usize));
    }

    fn select_current(&self) -> Effect {
        match (&self.on_select, self.selected()) {
            (Some(action), Some(row)) => action(row),
            _ => Effect::None,
        }
    }

    fn handle_filter_key(&mut self, key: Key) -> Effect {
        match key {
            Key::Char(c) => {
                self.filter.push(c);
                self.apply_filter();
            }
            Key::Backspace => {
                self.filter.pop();
                self.apply_filter();
            }
            Key::Enter => self.filtering = false,
            Key::Esc => {
                self.filtering = false;
                self.filter.clear();
                self.apply_filter();
            }
            Key::Up => self.move_selection(-1),
            Key::Down => self.move_selection(1),
            _ => {}
        }
        Effect::None
    }

    fn handle_key(&mut self, key: Key) -> Effect {
        if self.filtering {
            return self.handle_filter_key(key);
        }

        let page = self.page_size.max(1) as isize;
        match key {
            Key::Up | Key::Char('k') => self.move_selection(-1),
            Key::Down | Key::Char('j') => self.move_selection(1),
            Key::PageUp => self.move_selection(-page),
            Key::PageDown => self.move_selection(page),
            Key::Home => self.move_selection(isize::MIN / 2),
            Key::End => self.move_selection(isize::MAX / 2),
            Key::Char('/') => self.filtering = true,
            Key::Esc if !self.filter.is_empty() => {
                self.filter.clear();
                self.apply_filter();
            }
            Key::Enter => return self.select_current(),
            Key::Char(c) => {
                if let Some(option) = self.options.iter().find(|o| o.key == c) {
                    debug!("Table option '{}' ({})", c, option.title);
                    return (option.action)(self.selected());
                }
            }
            _ => {}
        }
        Effect::None
    }

    fn hints(&self) -> Line<'static> {
        if self.filtering {
            return Line::from(vec![
                Span::styled("Filter: ", Style::default().fg(Color::Yellow)),
                Span::raw(format!("{}█", self.filter)),
            ]);
        }

        let mut hints: Vec<(String, String)> = vec![
            ("Enter".to_string(), "Select".to_string()),
            ("/".to_string(), "Filter".to_string()),
        ];
        hints.extend(
            self.options
                .iter()
                .map(|o| (o.key.to_string(), o.title.clone())),
        );
        let borrowed: Vec<(&str, &str)> = hints
            .iter()
            .map(|(k, l)| (k.as_str(), l.as_str()))
            .collect();
        help_line(&borrowed)
    }
}

impl<T: Send + 'static> Screen for TableScreen<T> {
    /// Runs on push and every time the screen is uncovered, so rows are
    /// reloaded after returning from a command.
    fn init(&mut self) -> Effect {
        self.loader.start()
    }

    fn update(&mut self, action: Action) -> Effect {
        match action {
            Action::Loaded { id, payload } => {
                if let Some(rows) = self.loader.accept(id, payload) {
                    debug!("Table loaded {} rows", rows.len());
                    self.rows = rows;
                    self.loaded = true;
                    self.apply_filter();
                }
                Effect::None
            }
            Action::StackSize(size) => {
                self.page_size = size.height.saturating_sub(CHROME_HEIGHT);
                Effect::None
            }
            Action::Key(key) => self.handle_key(key),
            Action::Paste(text) => {
                if self.filtering {
                    self.filter.push_str(&text);
                    self.apply_filter();
                }
                Effect::None
            }
            _ => Effect::None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [table_area, help_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        if self.loaded && self.visible.is_empty() {
            let text = if self.filter.is_empty() {
                "No results."
            } else {
                "No rows match the filter."
            };
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
                table_area,
            );
        } else {
            let header = Row::new(self.columns.iter().map(|c| c.title))
                .style(Style::default().add_modifier(Modifier::BOLD));
            let rows: Vec<Row> = self
                .visible
                .iter()
                .filter_map(|&idx| self.rows.get(idx))
                .map(|row| Row::new((self.format_row)(row)))
                .collect();
            let widths: Vec<Constraint> = self.columns.iter().map(|c| c.width).collect();

            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                );
            frame.render_stateful_widget(table, table_area, &mut self.state);
        }

        frame.render_widget(self.hints(), help_area);
    }
}
