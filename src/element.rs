use peniko::kurbo::{Point, Rect, Vec2};

use crate::{
    hover::CursorTracking,
    keyboard::{KeyEvent, TextEvent},
    paint::DrawingSurface,
    pointer::ButtonEvent,
};

/// The element tree a window forwards its normalized input and drawing to.
///
/// The host holds only a weak reference to the implementor. Events for a
/// window whose element tree has been dropped are discarded.
pub trait ElementView {
    /// Render the visible content into `surface`, limited to `rect`.
    fn draw(&mut self, surface: &mut DrawingSurface, rect: Rect);

    fn cursor(&mut self, pos: Point, tracking: CursorTracking);

    fn click(&mut self, event: ButtonEvent);

    fn drag(&mut self, event: ButtonEvent);

    fn scroll(&mut self, delta: Vec2, pos: Point);

    /// Returns `true` when the key was consumed.
    fn key(&mut self, event: KeyEvent) -> bool;

    fn text(&mut self, event: TextEvent);
}
