//! The closed set of native events the host reacts to.
//!
//! Platform adapters such as [`crate::winit_events`] translate their own event
//! types into [`NativeEvent`] once, at the boundary. Everything the host does
//! not handle collapses into [`NativeEventKind::Other`].

use std::time::Instant;

use peniko::kurbo::{Point, Vec2};
use winit::{dpi::PhysicalSize, window::WindowId};

use crate::{keyboard::KeyCode, keyboard::Modifiers, pointer::MouseButton};

/// One event from the native event source, addressed to a window.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeEvent {
    pub window: WindowId,
    /// When the event was observed. All click and scroll timing is derived
    /// from this, never from the clock at dispatch time.
    pub time: Instant,
    pub kind: NativeEventKind,
}

impl NativeEvent {
    pub fn new(window: WindowId, time: Instant, kind: NativeEventKind) -> Self {
        Self { window, time, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NativeEventKind {
    Key { code: KeyCode, pressed: bool },
    Text(String),
    Button {
        button: MouseButton,
        pressed: bool,
        pos: Point,
    },
    Motion { pos: Point },
    /// A wheel movement in lines, reported at the current pointer position.
    Wheel { delta: Vec2, pos: Point },
    PointerEntered { pos: Point },
    PointerLeft { pos: Option<Point> },
    Modifiers(Modifiers),
    Resized { size: PhysicalSize<u32> },
    /// The window contents must be redrawn.
    Exposed,
    CloseRequested,
    Destroyed,
    Other,
}

impl NativeEventKind {
    /// Short name used in trace logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Key { .. } => "Key",
            Self::Text(..) => "Text",
            Self::Button { .. } => "Button",
            Self::Motion { .. } => "Motion",
            Self::Wheel { .. } => "Wheel",
            Self::PointerEntered { .. } => "PointerEntered",
            Self::PointerLeft { .. } => "PointerLeft",
            Self::Modifiers(..) => "Modifiers",
            Self::Resized { .. } => "Resized",
            Self::Exposed => "Exposed",
            Self::CloseRequested => "CloseRequested",
            Self::Destroyed => "Destroyed",
            Self::Other => "Other",
        }
    }
}
