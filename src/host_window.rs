//! The native window as seen by the host.

use std::sync::Arc;

use peniko::kurbo::Point;
use raw_window_handle::{HasDisplayHandle, RawDisplayHandle};
use view_host_present::{Presenter, SoftbufferPresenter};
use winit::{
    dpi::{PhysicalSize, Size},
    cursor::CursorIcon,
    window::{Window, WindowId},
};

/// The operations the host needs from a native window.
///
/// [`WinitWindow`] implements this for real windows; tests substitute a
/// mock so the full dispatch and paint path runs headless.
pub trait HostWindow {
    fn id(&self) -> WindowId;

    /// Drawable area in physical pixels.
    fn surface_size(&self) -> PhysicalSize<u32>;

    /// Top-left corner of the window on screen, if the platform reports it.
    fn outer_position(&self) -> Option<Point>;

    fn request_surface_size(&self, size: PhysicalSize<u32>);

    fn scale_factor(&self) -> f64;

    fn request_redraw(&self);

    fn set_cursor_icon(&self, icon: CursorIcon);

    /// Create the presenter that puts finished frames on screen.
    fn create_presenter(&self) -> anyhow::Result<Box<dyn Presenter>>;

    fn raw_display_handle(&self) -> Option<RawDisplayHandle>;
}

/// A winit window driven by the host.
#[derive(Clone)]
pub struct WinitWindow(pub Arc<dyn Window>);

impl WinitWindow {
    pub fn new(window: Arc<dyn Window>) -> Self {
        Self(window)
    }

    pub fn window(&self) -> &Arc<dyn Window> {
        &self.0
    }
}

impl HostWindow for WinitWindow {
    fn id(&self) -> WindowId {
        self.0.id()
    }

    fn surface_size(&self) -> PhysicalSize<u32> {
        self.0.surface_size()
    }

    fn outer_position(&self) -> Option<Point> {
        self.0
            .outer_position()
            .ok()
            .map(|pos| Point::new(pos.x as f64, pos.y as f64))
    }

    fn request_surface_size(&self, size: PhysicalSize<u32>) {
        // The platform may apply the size later, or not at all.
        let _ = self.0.request_surface_size(Size::Physical(size));
    }

    fn scale_factor(&self) -> f64 {
        self.0.scale_factor()
    }

    fn request_redraw(&self) {
        self.0.request_redraw();
    }

    fn set_cursor_icon(&self, icon: CursorIcon) {
        self.0.set_cursor(icon.into());
    }

    fn create_presenter(&self) -> anyhow::Result<Box<dyn Presenter>> {
        let presenter = SoftbufferPresenter::new(self.0.clone())?;
        Ok(Box::new(presenter))
    }

    fn raw_display_handle(&self) -> Option<RawDisplayHandle> {
        self.0
            .rwh_06_display_handle()
            .display_handle()
            .ok()
            .map(|handle| handle.as_raw())
    }
}
