use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use super::frame::{footer, header};
use super::stack::Stack;

/// Draws one frame of the session.
///
/// While a load is in flight the whole area shows the spinner and nothing
/// else. Otherwise the top screen is drawn between the header and footer;
/// screens below it are not drawn at all.
pub fn draw_ui(frame: &mut Frame, stack: &mut Stack) {
    let area = frame.area();

    if let Some(spinner) = stack.spinner() {
        draw_loading(frame, area, spinner.view());
        return;
    }

    if stack.is_empty() {
        return;
    }

    let header = header(stack.entries());
    let footer = footer(stack.entries());

    use Constraint::{Length, Min};
    let layout = Layout::vertical([
        Length(header.height() as u16),
        Min(0),
        Length(footer.height() as u16),
    ]);
    let [header_area, body_area, footer_area] = layout.areas(area);

    frame.render_widget(Paragraph::new(header), header_area);
    frame.render_widget(Paragraph::new(footer), footer_area);

    if let Some(top) = stack.top_mut() {
        top.screen.render(frame, body_area);
    }
}

fn draw_loading(frame: &mut Frame, area: Rect, spinner: &str) {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let text = Paragraph::new(format!("{spinner} Loading..."))
        .style(Style::default().fg(Color::Cyan))
        .centered();
    frame.render_widget(text, row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeClipboard, entry};
    use crate::tui::action::{Action, Effect, LoadId};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(stack: &mut Stack, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw_ui(f, stack)).unwrap();

        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn stack() -> Stack {
        Stack::new(Box::new(FakeClipboard::default()))
    }

    #[test]
    fn test_empty_stack_draws_nothing() {
        let mut stack = stack();
        let lines = render(&mut stack, 40, 8);
        assert!(lines.iter().all(|l| l.is_empty()));
    }

    #[test]
    fn test_frame_around_top_screen() {
        let mut stack = stack();
        stack.push(entry("services").with_breadcrumb("Services"));
        stack.push(
            entry("deploy")
                .with_breadcrumb("Deploy")
                .with_command("cloudnav deploy srv-1"),
        );

        let lines = render(&mut stack, 90, 10);
        assert_eq!(lines[1], "Services > Deploy");
        assert_eq!(lines[3], "deploy");
        assert_eq!(
            lines[9],
            "Navigation: [Ctrl+C] Quit [Ctrl+D] Previous command [Ctrl+S] Copy command to clipboard"
        );
    }

    #[test]
    fn test_spinner_replaces_everything() {
        let mut stack = stack();
        stack.push(entry("services").with_breadcrumb("Services"));
        stack.dispatch(Action::LoadingStarted {
            id: LoadId::next(),
            task: Box::pin(futures::future::pending::<Effect>()),
        });

        let lines = render(&mut stack, 40, 9);
        let text = lines.join("\n");
        assert!(text.contains("Loading..."));
        assert!(!text.contains("Services"));
    }
}
