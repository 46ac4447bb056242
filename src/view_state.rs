use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use peniko::kurbo::Point;
use winit::{dpi::PhysicalSize, window::WindowId};

use crate::{
    cursor::CursorType,
    element::ElementView,
    host_window::HostWindow,
    hover::CursorTracker,
    keyboard::{KeyStateTracker, Modifiers},
    paint::{FramePipeline, PaintOutcome},
    pointer::GestureClassifier,
    scroll::ScrollMomentum,
};

/// Everything the host keeps for one live window.
pub struct ViewState {
    pub(crate) owner: Weak<RefCell<dyn ElementView>>,
    pub(crate) window: Rc<dyn HostWindow>,
    pub(crate) modifiers: Modifiers,
    pub(crate) keys: KeyStateTracker,
    pub(crate) gestures: GestureClassifier,
    pub(crate) scroll: ScrollMomentum,
    pub(crate) cursor: CursorTracker,
    pub(crate) frame: FramePipeline,
    pub(crate) last_cursor: Option<CursorType>,
}

impl ViewState {
    pub fn new(window: Rc<dyn HostWindow>, owner: Weak<RefCell<dyn ElementView>>) -> Self {
        Self {
            owner,
            window,
            modifiers: Modifiers::empty(),
            keys: KeyStateTracker::new(),
            gestures: GestureClassifier::new(),
            scroll: ScrollMomentum::new(),
            cursor: CursorTracker::new(),
            frame: FramePipeline::default(),
            last_cursor: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    pub fn window(&self) -> &Rc<dyn HostWindow> {
        &self.window
    }

    /// The element tree, if it is still alive.
    pub fn owner(&self) -> Option<Rc<RefCell<dyn ElementView>>> {
        self.owner.upgrade()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn keys(&self) -> &KeyStateTracker {
        &self.keys
    }

    pub fn gestures(&self) -> &GestureClassifier {
        &self.gestures
    }

    pub fn scroll(&self) -> &ScrollMomentum {
        &self.scroll
    }

    pub fn cursor(&self) -> &CursorTracker {
        &self.cursor
    }

    pub fn cursor_pos(&self) -> Point {
        self.cursor.last_position()
    }

    /// Largest window extent the drawing buffers have been sized for.
    pub fn watermark(&self) -> PhysicalSize<u32> {
        self.frame.watermark()
    }

    /// Size of the currently allocated drawing surface, if any.
    pub fn surface_size(&self) -> Option<PhysicalSize<u32>> {
        self.frame.surface_size()
    }

    /// The cursor shape last applied to the window.
    pub fn last_cursor(&self) -> Option<CursorType> {
        self.last_cursor
    }

    /// Render the element tree and present the result.
    pub(crate) fn paint(&mut self) -> PaintOutcome {
        let Some(owner) = self.owner.upgrade() else {
            tracing::trace!(window = ?self.id(), "element tree dropped, not painting");
            return PaintOutcome::Skipped;
        };
        let mut view = owner.borrow_mut();
        self.frame.paint(self.window.as_ref(), &mut *view)
    }

    /// Release the presenter and the drawing buffers.
    pub(crate) fn release(&mut self) {
        self.frame.release();
    }
}

impl std::fmt::Debug for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewState")
            .field("window", &self.id())
            .field("modifiers", &self.modifiers)
            .field("dragging", &self.gestures.is_dragging())
            .field("pointer_inside", &self.cursor.is_inside())
            .field("watermark", &self.frame.watermark())
            .finish_non_exhaustive()
    }
}
