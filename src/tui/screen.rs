use ratatui::Frame;
use ratatui::layout::Rect;

use super::action::{Action, Effect};

/// One interactive view on the navigation stack.
///
/// Screens follow the Elm pattern:
/// - `init` runs each time the screen becomes the top of the stack (on push
///   and again when the screen above it is popped), so it doubles as refresh.
/// - `update` reacts to one action and answers with an effect.
/// - `render` draws into the content area between header and footer.
///
/// The stack owns screens as `Box<dyn Screen>` and never looks at the
/// concrete type.
pub trait Screen: Send {
    fn init(&mut self) -> Effect {
        Effect::None
    }

    fn update(&mut self, action: Action) -> Effect;

    /// Takes `&mut self` so screens can keep presentation state such as
    /// ratatui `TableState` offsets across frames.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
