use std::time::Duration;

use super::action::LoadId;

/// Braille dot spinner, one frame per tick.
const FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// The loading indicator. Tagged with the load that installed it so ticks
/// and completions from older loads can be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spinner {
    id: LoadId,
    frame: usize,
}

impl Spinner {
    pub fn new(id: LoadId) -> Self {
        Self { id, frame: 0 }
    }

    pub fn id(&self) -> LoadId {
        self.id
    }

    pub fn advance(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    pub fn view(&self) -> &'static str {
        FRAMES[self.frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps_around() {
        let mut spinner = Spinner::new(LoadId::next());
        let first = spinner.view();
        for _ in 0..FRAMES.len() {
            spinner.advance();
        }
        assert_eq!(spinner.view(), first);
    }

    #[test]
    fn test_advance_changes_frame() {
        let mut spinner = Spinner::new(LoadId::next());
        let first = spinner.view();
        spinner.advance();
        assert_ne!(spinner.view(), first);
    }
}
