//! Component trait: the interface every UI panel implements.
//!
//! - Components own their state and render themselves.
//! - Components produce `Vec<Action>`; the App event-loop dispatches them.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::Action;

pub trait Component {
    /// Handle a key event. Returns actions to be dispatched.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action>;

    /// Handle a mouse event inside `area` (the rect last drawn into).
    fn handle_mouse(&mut self, event: MouseEvent, area: Rect) -> Vec<Action>;

    /// Called each UI tick (~100ms) for animations.
    /// Returns true when the component needs a redraw.
    fn tick(&mut self) -> bool {
        false
    }

    /// Receive an action dispatched by the App.
    fn on_action(&mut self, action: &Action) -> Vec<Action>;

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool);
}
