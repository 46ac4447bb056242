use std::time::{Duration, Instant};

use peniko::kurbo::Point;

use crate::keyboard::Modifiers;

/// The three buttons the element tree distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

impl From<winit::event::MouseButton> for MouseButton {
    /// Anything other than the middle or right button is treated as left.
    fn from(value: winit::event::MouseButton) -> Self {
        match value {
            winit::event::MouseButton::Middle => Self::Middle,
            winit::event::MouseButton::Right => Self::Right,
            _ => Self::Left,
        }
    }
}

/// A button press, release or drag as delivered to the element tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvent {
    pub down: bool,
    pub click_count: u32,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    /// Window-local position.
    pub pos: Point,
}

/// Derives click counts from button-down timing and tracks whether a drag
/// is in progress.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    click_start: Option<Instant>,
    click_count: u32,
    dragging: bool,
    drag_button: MouseButton,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Classify a native button transition at `time`.
    ///
    /// A press within `interval` of the previous press continues the click
    /// sequence, anything slower starts a new one. A press engages the drag
    /// state and the matching release clears it.
    pub fn button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        pos: Point,
        modifiers: Modifiers,
        time: Instant,
        interval: Duration,
    ) -> ButtonEvent {
        if pressed {
            let repeated = self
                .click_start
                .is_some_and(|start| time.saturating_duration_since(start) <= interval);
            self.click_count = if repeated { self.click_count + 1 } else { 1 };
            self.click_start = Some(time);
            self.dragging = true;
            self.drag_button = button;
        } else {
            self.dragging = false;
        }

        ButtonEvent {
            down: pressed,
            click_count: self.click_count,
            button,
            modifiers,
            pos,
        }
    }

    /// The drag event for pointer motion, or `None` when no button is held.
    pub fn drag(&self, pos: Point, modifiers: Modifiers) -> Option<ButtonEvent> {
        self.dragging.then_some(ButtonEvent {
            down: true,
            click_count: self.click_count,
            button: self.drag_button,
            modifiers,
            pos,
        })
    }
}
