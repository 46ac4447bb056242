use peniko::kurbo::Point;

/// Tag attached to cursor events delivered to the element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorTracking {
    Entering,
    Hovering,
    Leaving,
}

/// Tracks whether the pointer is inside the window.
///
/// Native enter notifications are not always delivered, so a motion event
/// seen while outside also counts as entering.
///
/// Leaving the window is reported with [`CursorTracking::Entering`];
/// [`CursorTracking::Leaving`] is never produced here.
#[derive(Debug, Default)]
pub struct CursorTracker {
    inside: bool,
    last_pos: Point,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// The last pointer position seen in window-local coordinates.
    pub fn last_position(&self) -> Point {
        self.last_pos
    }

    /// Remember `pos` without producing a cursor event.
    pub fn record(&mut self, pos: Point) {
        self.last_pos = pos;
    }

    pub fn enter(&mut self, pos: Point) -> (Point, CursorTracking) {
        self.last_pos = pos;
        self.inside = true;
        (pos, CursorTracking::Entering)
    }

    pub fn motion(&mut self, pos: Point) -> (Point, CursorTracking) {
        self.last_pos = pos;
        if self.inside {
            (pos, CursorTracking::Hovering)
        } else {
            self.inside = true;
            (pos, CursorTracking::Entering)
        }
    }

    /// The pointer left the window. Reported at `pos` when the platform
    /// supplies one, at the last known position otherwise.
    pub fn leave(&mut self, pos: Option<Point>) -> (Point, CursorTracking) {
        if let Some(pos) = pos {
            self.last_pos = pos;
        }
        self.inside = false;
        (self.last_pos, CursorTracking::Entering)
    }
}
