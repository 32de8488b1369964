use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::action::{Action, Key};

/// Wait up to `timeout` for a terminal event the session cares about.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<Action>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(translate(event::read()?))
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<Action>> {
    poll_event_timeout(Duration::ZERO)
}

/// Map a crossterm event onto an action. Key releases, mouse input and focus
/// changes are dropped. Pasted text keeps only its printable characters.
pub fn translate(event: Event) -> Option<Action> {
    match event {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            translate_key(key_event).map(Action::Key)
        }
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        Event::Paste(text) => {
            let text: String = text.chars().filter(|c| !c.is_control()).collect();
            (!text.is_empty()).then_some(Action::Paste(text))
        }
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<Key> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    match (key_event.modifiers, key_event.code) {
        (m, KeyCode::Char(c)) if m.contains(KeyModifiers::CONTROL) => {
            Some(Key::Ctrl(c.to_ascii_lowercase()))
        }
        (_, KeyCode::Char(c)) => Some(Key::Char(c)),
        (_, KeyCode::Enter) => Some(Key::Enter),
        (_, KeyCode::Esc) => Some(Key::Esc),
        (_, KeyCode::Backspace) => Some(Key::Backspace),
        (_, KeyCode::Tab) => Some(Key::Tab),
        (_, KeyCode::Up) => Some(Key::Up),
        (_, KeyCode::Down) => Some(Key::Down),
        (_, KeyCode::PageUp) => Some(Key::PageUp),
        (_, KeyCode::PageDown) => Some(Key::PageDown),
        (_, KeyCode::Home) => Some(Key::Home),
        (_, KeyCode::End) => Some(Key::End),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent, MouseEventKind};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn translated_key(event: Event) -> Option<Key> {
        match translate(event) {
            Some(Action::Key(k)) => Some(k),
            _ => None,
        }
    }

    #[test]
    fn test_plain_characters() {
        assert_eq!(
            translated_key(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Key::Char('j'))
        );
        assert_eq!(
            translated_key(key(KeyCode::Char('W'), KeyModifiers::SHIFT)),
            Some(Key::Char('W'))
        );
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(
            translated_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Ctrl('c'))
        );
        assert_eq!(
            translated_key(key(
                KeyCode::Char('D'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            )),
            Some(Key::Ctrl('d'))
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            translated_key(key(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(Key::PageDown)
        );
        assert_eq!(
            translated_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Key::Enter)
        );
        assert_eq!(translated_key(key(KeyCode::F(5), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(translate(release).is_none());
    }

    #[test]
    fn test_resize() {
        assert!(matches!(
            translate(Event::Resize(120, 40)),
            Some(Action::Resize {
                width: 120,
                height: 40
            })
        ));
    }

    #[test]
    fn test_paste_keeps_text() {
        match translate(Event::Paste("srv-".into())) {
            Some(Action::Paste(text)) => assert_eq!(text, "srv-"),
            other => panic!("expected paste, got {other:?}"),
        }
    }

    #[test]
    fn test_paste_strips_newlines() {
        match translate(Event::Paste("srv-1\r\n".into())) {
            Some(Action::Paste(text)) => assert_eq!(text, "srv-1"),
            other => panic!("expected paste, got {other:?}"),
        }
        assert!(translate(Event::Paste("\n".into())).is_none());
    }

    #[test]
    fn test_mouse_is_ignored() {
        let mouse = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });
        assert!(translate(mouse).is_none());
    }
}
