//! # view_host
//!
//! The host layer between a native window system and a portable element
//! tree.
//!
//! Native input arrives as winit [`WindowEvent`](winit::event::WindowEvent)s,
//! is converted once into a closed [`NativeEvent`] and routed to the state of
//! the window it belongs to. There it is normalized:
//!
//! - key presses and releases pass through a [`KeyStateTracker`] that turns
//!   repeated presses into [`KeyAction::Repeat`], drops duplicate releases
//!   and works around unreliable native reports for the shift and
//!   print-screen keys,
//! - button presses get a click count from a [`GestureClassifier`], which
//!   also turns motion with a button held into drag events,
//! - wheel deltas are accelerated by [`ScrollMomentum`],
//! - pointer motion is tagged by a [`CursorTracker`].
//!
//! The normalized event is handed to the window's [`ElementView`], and the
//! window is repainted: the element tree draws into a CPU-side
//! [`DrawingSurface`] that is copied into a texture and presented.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::{cell::RefCell, rc::Rc};
//! use view_host::{Host, HostConfig};
//!
//! let mut host = Host::new(HostConfig::default())?;
//! let view: Rc<RefCell<dyn ElementView>> = Rc::new(RefCell::new(MyView::default()));
//!
//! // inside `ApplicationHandler::can_create_surfaces`
//! let id = host.open_window(event_loop, Rect::new(100.0, 100.0, 500.0, 400.0), Rc::downgrade(&view))?;
//!
//! // inside `ApplicationHandler::window_event`
//! host.handle_window_event(event_loop, window_id, &event);
//! ```

pub mod clipboard;
pub mod config;
pub mod cursor;
pub mod dispatch;
pub mod element;
pub mod error;
pub mod host;
pub mod host_window;
pub mod hover;
pub mod keyboard;
pub mod native;
pub mod paint;
pub mod pointer;
pub mod registry;
pub mod scroll;
pub mod view_state;
pub mod winit_events;

#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use clipboard::{Clipboard, ClipboardError};
pub use config::HostConfig;
pub use cursor::CursorType;
pub use dispatch::Dispatched;
pub use element::ElementView;
pub use error::HostError;
pub use host::Host;
pub use host_window::{HostWindow, WinitWindow};
pub use hover::{CursorTracker, CursorTracking};
pub use keyboard::{KeyAction, KeyCode, KeyEvent, KeyStateTracker, Modifiers, TextEvent};
pub use native::{NativeEvent, NativeEventKind};
pub use paint::{DrawingSurface, PaintOutcome};
pub use pointer::{ButtonEvent, GestureClassifier, MouseButton};
pub use registry::ViewRegistry;
pub use scroll::ScrollMomentum;
pub use view_state::ViewState;
pub use winit_events::WinitEventAdapter;

pub use peniko::kurbo;
pub use tiny_skia;
pub use view_host_present as present;
pub use winit;
