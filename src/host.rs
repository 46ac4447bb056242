use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    sync::Arc,
    time::Instant,
};

use peniko::kurbo::{Point, Rect, Size, Vec2};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{WindowAttributes, WindowId},
};

use crate::{
    clipboard::Clipboard,
    config::HostConfig,
    cursor::{self, CursorType},
    dispatch::{self, Dispatched, HDPI_SCALE},
    element::ElementView,
    error::HostError,
    host_window::{HostWindow, WinitWindow},
    native::NativeEvent,
    paint::PaintOutcome,
    registry::ViewRegistry,
    view_state::ViewState,
    winit_events::WinitEventAdapter,
};

/// Owns every window this process hosts and routes their events.
///
/// All state lives here rather than in globals, so independent hosts can
/// coexist. A host is driven from a single thread.
pub struct Host {
    config: HostConfig,
    views: ViewRegistry,
    adapter: WinitEventAdapter,
    last_window_closed: bool,
}

impl Default for Host {
    fn default() -> Self {
        let config = HostConfig::default();
        Self {
            adapter: WinitEventAdapter::new(config.pixels_per_line),
            config,
            views: ViewRegistry::new(),
            last_window_closed: false,
        }
    }
}

impl Host {
    pub fn new(config: HostConfig) -> Result<Self, HostError> {
        config.validate()?;
        Ok(Self {
            adapter: WinitEventAdapter::new(config.pixels_per_line),
            config,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    pub fn view(&self, id: WindowId) -> Option<&ViewState> {
        self.views.lookup(id)
    }

    /// Create a native window covering `bounds` and host `owner` in it.
    pub fn open_window(
        &mut self,
        event_loop: &dyn ActiveEventLoop,
        bounds: Rect,
        owner: Weak<RefCell<dyn ElementView>>,
    ) -> Result<WindowId, HostError> {
        let size = bounds.size();
        let (width, height) = (size.width.round() as u32, size.height.round() as u32);
        if width == 0 || height == 0 {
            return Err(HostError::ZeroSizedSurface { width, height });
        }

        let attributes = WindowAttributes::default()
            .with_surface_size(PhysicalSize::new(width, height))
            .with_position(PhysicalPosition::new(
                bounds.x0.round() as i32,
                bounds.y0.round() as i32,
            ));
        let window = event_loop
            .create_window(attributes)
            .map_err(|e| HostError::WindowCreation(e.to_string()))?;

        let window = WinitWindow::new(Arc::from(window));
        Ok(self.adopt_window(Rc::new(window), owner))
    }

    /// Host `owner` in a window created elsewhere.
    pub fn adopt_window(
        &mut self,
        window: Rc<dyn HostWindow>,
        owner: Weak<RefCell<dyn ElementView>>,
    ) -> WindowId {
        self.init_clipboard(window.as_ref());
        let state = self.views.register(ViewState::new(window, owner));
        state.id()
    }

    /// Stop hosting the window and release its graphics resources.
    pub fn close_window(&mut self, id: WindowId) -> Result<(), HostError> {
        self.views
            .unregister(id)
            .ok_or(HostError::UnknownWindow(id))?;
        self.forget_window(id);
        Ok(())
    }

    /// Whether the application should leave its event loop.
    pub fn should_exit(&self) -> bool {
        self.last_window_closed && self.config.exit_on_last_window_closed && self.views.is_empty()
    }

    pub fn size(&self, id: WindowId) -> Result<Size, HostError> {
        let size = self.state(id)?.window.surface_size();
        Ok(Size::new(size.width as f64, size.height as f64))
    }

    pub fn position(&self, id: WindowId) -> Result<Option<Point>, HostError> {
        Ok(self.state(id)?.window.outer_position())
    }

    pub fn set_size(&self, id: WindowId, size: Size) -> Result<(), HostError> {
        let (width, height) = (size.width.round() as u32, size.height.round() as u32);
        if width == 0 || height == 0 {
            return Err(HostError::ZeroSizedSurface { width, height });
        }
        self.state(id)?
            .window
            .request_surface_size(PhysicalSize::new(width, height));
        Ok(())
    }

    /// Last pointer position observed inside the window.
    pub fn cursor_pos(&self, id: WindowId) -> Result<Point, HostError> {
        Ok(self.state(id)?.cursor_pos())
    }

    pub fn hdpi_scale(&self) -> f64 {
        HDPI_SCALE
    }

    pub fn scroll_direction(&self) -> Vec2 {
        Vec2::new(1.0, 1.0)
    }

    /// Show `cursor` over the window. Reapplying the current shape does
    /// nothing.
    pub fn set_cursor(&mut self, id: WindowId, cursor: CursorType) -> Result<(), HostError> {
        let state = self.state_mut(id)?;
        if state.last_cursor != Some(cursor) {
            cursor::set_cursor(state.window.as_ref(), cursor);
            state.last_cursor = Some(cursor);
        }
        Ok(())
    }

    /// Repaint the window now.
    ///
    /// A window whose element tree was dropped is closed instead.
    pub fn refresh(&mut self, id: WindowId) -> Result<PaintOutcome, HostError> {
        if self.state(id)?.owner().is_none() {
            tracing::debug!(window = ?id, "element tree dropped, releasing view state");
            self.close_window(id)?;
            return Ok(PaintOutcome::Skipped);
        }
        Ok(self.state_mut(id)?.paint())
    }

    /// Repaint after `area` changed. The whole window is repainted.
    pub fn refresh_area(&mut self, id: WindowId, area: Rect) -> Result<PaintOutcome, HostError> {
        tracing::trace!(window = ?id, ?area, "refresh area");
        self.refresh(id)
    }

    /// Ask the platform for a repaint. The frame is painted when the
    /// resulting redraw event is dispatched.
    pub fn request_redraw(&self, id: WindowId) -> Result<(), HostError> {
        self.state(id)?.window.request_redraw();
        Ok(())
    }

    /// The scale factor the platform reports for the window. Drawing and
    /// event positions stay in physical pixels regardless.
    pub fn native_scale_factor(&self, id: WindowId) -> Result<f64, HostError> {
        Ok(self.state(id)?.window.scale_factor())
    }

    /// Route one native event to its window.
    ///
    /// A close request or destruction closes the window.
    pub fn dispatch(&mut self, event: NativeEvent) -> Dispatched {
        let dispatched = dispatch::dispatch(&mut self.views, &self.config, &event);
        match dispatched {
            Dispatched::CloseRequested | Dispatched::Destroyed => {
                if let Err(err) = self.close_window(event.window) {
                    tracing::debug!("{err}");
                }
            }
            Dispatched::ViewDropped => self.forget_window(event.window),
            Dispatched::Unrouted | Dispatched::Handled(_) => {}
        }
        dispatched
    }

    /// Translate and dispatch a winit event, leaving the event loop once the
    /// last window has closed.
    pub fn handle_window_event(
        &mut self,
        event_loop: &dyn ActiveEventLoop,
        id: WindowId,
        event: &WindowEvent,
    ) {
        let mut events = Vec::new();
        self.adapter
            .translate(id, event, Instant::now(), |event| events.push(event));
        for event in events {
            self.dispatch(event);
        }
        if self.should_exit() {
            event_loop.exit();
        }
    }

    /// Drop per-window bookkeeping once the window's state is gone.
    fn forget_window(&mut self, id: WindowId) {
        self.adapter.forget(id);
        if self.views.is_empty() {
            tracing::debug!("last window closed");
            self.last_window_closed = true;
        }
    }

    fn init_clipboard(&self, window: &dyn HostWindow) {
        if Clipboard::is_initialized() {
            return;
        }
        let Some(display) = window.raw_display_handle() else {
            return;
        };
        // The display outlives every window of the event loop it came from.
        if let Err(err) = unsafe { Clipboard::init(display) } {
            tracing::warn!("clipboard unavailable: {err}");
        }
    }

    fn state(&self, id: WindowId) -> Result<&ViewState, HostError> {
        self.views.lookup(id).ok_or(HostError::UnknownWindow(id))
    }

    fn state_mut(&mut self, id: WindowId) -> Result<&mut ViewState, HostError> {
        self.views.lookup_mut(id).ok_or(HostError::UnknownWindow(id))
    }
}
