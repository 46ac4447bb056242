//! Test harness for headless host testing.
//!
//! This module runs the complete dispatch and paint path without a window
//! system. A [`MockWindow`] stands in for the native window, a
//! [`MockPresenter`] records what would have reached the screen, and a
//! [`RecordingView`] logs every call the host makes into the element tree.
//!
//! Event timestamps are given as millisecond offsets from the moment the
//! harness was created, which keeps click and scroll timing deterministic.
//!
//! # Example
//!
//! ```rust,ignore
//! use view_host::test_harness::TestHarness;
//!
//! let mut harness = TestHarness::new_with_size(400, 300);
//! harness.button_down(0, 10.0, 10.0);
//! harness.button_down(50, 10.0, 10.0);
//! assert_eq!(harness.clicks()[1].click_count, 2);
//! ```

use std::{
    cell::{Cell, Ref, RefCell},
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
    time::{Duration, Instant},
};

use anyhow::anyhow;
use peniko::kurbo::{Point, Rect, Vec2};
use raw_window_handle::RawDisplayHandle;
use tiny_skia::{Color, Paint, Rect as SkiaRect, Transform};
use view_host_present::{Presenter, Texture};
use winit::{
    dpi::PhysicalSize,
    cursor::CursorIcon,
    window::WindowId,
};

use crate::{
    config::HostConfig,
    dispatch::Dispatched,
    element::ElementView,
    error::HostError,
    host::Host,
    host_window::HostWindow,
    hover::CursorTracking,
    keyboard::{KeyCode, KeyEvent, Modifiers, TextEvent},
    native::{NativeEvent, NativeEventKind},
    paint::{DrawingSurface, PaintOutcome},
    pointer::{ButtonEvent, MouseButton},
    view_state::ViewState,
};

/// Counter for generating unique window IDs.
static WINDOW_ID_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// What the mock presenters of one window did.
#[derive(Debug, Default)]
pub struct PresenterLog {
    /// Number of presenters created.
    pub presenters: usize,
    /// Size of every texture allocated, in order.
    pub textures: Vec<(u32, u32)>,
    /// Extent of every presented frame, in order.
    pub frames: Vec<(u32, u32)>,
    /// Top-left pixel of the last presented frame.
    pub last_pixel: Option<u32>,
    /// Number of upcoming texture allocations that fail.
    pub failing_textures: u32,
}

/// A presenter that keeps frames in memory.
pub struct MockPresenter {
    log: Rc<RefCell<PresenterLog>>,
}

impl Presenter for MockPresenter {
    fn create_texture(&mut self, width: u32, height: u32) -> anyhow::Result<Texture> {
        let mut log = self.log.borrow_mut();
        if log.failing_textures > 0 {
            log.failing_textures -= 1;
            return Err(anyhow!("mock texture allocation failed"));
        }
        log.textures.push((width, height));
        Texture::new(width, height)
    }

    fn present(&mut self, texture: &Texture, width: u32, height: u32) -> anyhow::Result<()> {
        let mut log = self.log.borrow_mut();
        log.frames.push((width, height));
        log.last_pixel = texture.row(0).first().copied();
        Ok(())
    }

    fn debug_info(&self) -> String {
        "name: mock".to_string()
    }
}

/// A window that exists only in memory.
pub struct MockWindow {
    id: WindowId,
    size: Cell<PhysicalSize<u32>>,
    position: Cell<Point>,
    redraws: Cell<usize>,
    cursors: RefCell<Vec<CursorIcon>>,
    failing_presenters: Cell<u32>,
    log: Rc<RefCell<PresenterLog>>,
}

impl MockWindow {
    pub fn new(width: u32, height: u32) -> Self {
        let id = WindowId::from_raw(WINDOW_ID_COUNTER.fetch_add(1, Ordering::SeqCst));
        Self {
            id,
            size: Cell::new(PhysicalSize::new(width, height)),
            position: Cell::new(Point::ZERO),
            redraws: Cell::new(0),
            cursors: RefCell::default(),
            failing_presenters: Cell::new(0),
            log: Rc::default(),
        }
    }

    /// Change the size the window reports, as a user resize would.
    pub fn resize(&self, width: u32, height: u32) {
        self.size.set(PhysicalSize::new(width, height));
    }

    pub fn redraw_requests(&self) -> usize {
        self.redraws.get()
    }

    /// Every cursor icon applied, in order.
    pub fn cursors(&self) -> Vec<CursorIcon> {
        self.cursors.borrow().clone()
    }

    /// Make the next `count` presenter creations fail.
    pub fn fail_presenters(&self, count: u32) {
        self.failing_presenters.set(count);
    }

    /// Make the next `count` texture allocations fail.
    pub fn fail_textures(&self, count: u32) {
        self.log.borrow_mut().failing_textures = count;
    }

    pub fn presenter_log(&self) -> Ref<'_, PresenterLog> {
        self.log.borrow()
    }

    /// Number of presenters created for this window that are still alive.
    pub fn live_presenters(&self) -> usize {
        Rc::strong_count(&self.log) - 1
    }
}

impl HostWindow for MockWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn surface_size(&self) -> PhysicalSize<u32> {
        self.size.get()
    }

    fn outer_position(&self) -> Option<Point> {
        Some(self.position.get())
    }

    fn request_surface_size(&self, size: PhysicalSize<u32>) {
        self.size.set(size);
    }

    fn scale_factor(&self) -> f64 {
        1.0
    }

    fn request_redraw(&self) {
        self.redraws.set(self.redraws.get() + 1);
    }

    fn set_cursor_icon(&self, icon: CursorIcon) {
        self.cursors.borrow_mut().push(icon);
    }

    fn create_presenter(&self) -> anyhow::Result<Box<dyn Presenter>> {
        let failing = self.failing_presenters.get();
        if failing > 0 {
            self.failing_presenters.set(failing - 1);
            return Err(anyhow!("mock presenter creation failed"));
        }
        self.log.borrow_mut().presenters += 1;
        Ok(Box::new(MockPresenter {
            log: self.log.clone(),
        }))
    }

    fn raw_display_handle(&self) -> Option<RawDisplayHandle> {
        None
    }
}

/// One call the host made into the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Draw { rect: Rect, surface: (u32, u32) },
    Cursor(Point, CursorTracking),
    Click(ButtonEvent),
    Drag(ButtonEvent),
    Scroll(Vec2, Point),
    Key(KeyEvent),
    Text(TextEvent),
}

/// An element tree that records what it is asked to do.
///
/// Drawing fills the requested rectangle with [`RecordingView::fill`].
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    /// Value returned from key callbacks.
    pub consume_keys: bool,
    pub fill: Color,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            consume_keys: true,
            fill: Color::from_rgba8(0x20, 0x40, 0x80, 0xff),
        }
    }
}

impl ElementView for RecordingView {
    fn draw(&mut self, surface: &mut DrawingSurface, rect: Rect) {
        self.calls.push(ViewCall::Draw {
            rect,
            surface: (surface.width(), surface.height()),
        });
        let mut paint = Paint::default();
        paint.set_color(self.fill);
        if let Some(area) = SkiaRect::from_xywh(0.0, 0.0, rect.width() as f32, rect.height() as f32) {
            surface
                .pixmap_mut()
                .fill_rect(area, &paint, Transform::identity(), None);
        }
    }

    fn cursor(&mut self, pos: Point, tracking: CursorTracking) {
        self.calls.push(ViewCall::Cursor(pos, tracking));
    }

    fn click(&mut self, event: ButtonEvent) {
        self.calls.push(ViewCall::Click(event));
    }

    fn drag(&mut self, event: ButtonEvent) {
        self.calls.push(ViewCall::Drag(event));
    }

    fn scroll(&mut self, delta: Vec2, pos: Point) {
        self.calls.push(ViewCall::Scroll(delta, pos));
    }

    fn key(&mut self, event: KeyEvent) -> bool {
        self.calls.push(ViewCall::Key(event));
        self.consume_keys
    }

    fn text(&mut self, event: TextEvent) {
        self.calls.push(ViewCall::Text(event));
    }
}

/// A host with one mock window showing a [`RecordingView`].
pub struct TestHarness {
    host: Host,
    window: Rc<MockWindow>,
    view: Option<Rc<RefCell<RecordingView>>>,
    id: WindowId,
    start: Instant,
}

impl TestHarness {
    /// Create a harness with a 400x300 window and the default configuration.
    pub fn new() -> Self {
        Self::new_with_size(400, 300)
    }

    pub fn new_with_size(width: u32, height: u32) -> Self {
        Self::with_config(HostConfig::default(), width, height)
            .expect("default configuration is valid")
    }

    pub fn with_config(config: HostConfig, width: u32, height: u32) -> Result<Self, HostError> {
        let mut host = Host::new(config)?;
        let window = Rc::new(MockWindow::new(width, height));
        let view = Rc::new(RefCell::new(RecordingView::default()));
        let element: Rc<RefCell<dyn ElementView>> = view.clone();
        let id = host.adopt_window(window.clone(), Rc::downgrade(&element));
        Ok(Self {
            host,
            window,
            view: Some(view),
            id,
            start: Instant::now(),
        })
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    pub fn window(&self) -> &MockWindow {
        &self.window
    }

    /// State of the harness window, if it is still registered.
    pub fn state(&self) -> Option<&ViewState> {
        self.host.view(self.id)
    }

    /// The instant `ms` milliseconds after the harness was created.
    pub fn at(&self, ms: u64) -> Instant {
        self.start + Duration::from_millis(ms)
    }

    /// Dispatch `kind` to the harness window at `ms`.
    pub fn send(&mut self, ms: u64, kind: NativeEventKind) -> Dispatched {
        let event = NativeEvent::new(self.id, self.at(ms), kind);
        self.host.dispatch(event)
    }

    pub fn button(&mut self, ms: u64, button: MouseButton, pressed: bool, x: f64, y: f64) -> Dispatched {
        self.send(
            ms,
            NativeEventKind::Button {
                button,
                pressed,
                pos: Point::new(x, y),
            },
        )
    }

    pub fn button_down(&mut self, ms: u64, x: f64, y: f64) -> Dispatched {
        self.button(ms, MouseButton::Left, true, x, y)
    }

    pub fn button_up(&mut self, ms: u64, x: f64, y: f64) -> Dispatched {
        self.button(ms, MouseButton::Left, false, x, y)
    }

    pub fn motion(&mut self, ms: u64, x: f64, y: f64) -> Dispatched {
        self.send(ms, NativeEventKind::Motion { pos: Point::new(x, y) })
    }

    pub fn enter(&mut self, ms: u64, x: f64, y: f64) -> Dispatched {
        self.send(ms, NativeEventKind::PointerEntered { pos: Point::new(x, y) })
    }

    pub fn leave(&mut self, ms: u64) -> Dispatched {
        self.send(ms, NativeEventKind::PointerLeft { pos: None })
    }

    pub fn wheel(&mut self, ms: u64, dx: f64, dy: f64) -> Dispatched {
        let pos = self.host.cursor_pos(self.id).unwrap_or(Point::ZERO);
        self.send(
            ms,
            NativeEventKind::Wheel {
                delta: Vec2::new(dx, dy),
                pos,
            },
        )
    }

    pub fn key_down(&mut self, ms: u64, code: KeyCode) -> Dispatched {
        self.send(ms, NativeEventKind::Key { code, pressed: true })
    }

    pub fn key_up(&mut self, ms: u64, code: KeyCode) -> Dispatched {
        self.send(ms, NativeEventKind::Key { code, pressed: false })
    }

    pub fn text(&mut self, ms: u64, text: &str) -> Dispatched {
        self.send(ms, NativeEventKind::Text(text.to_string()))
    }

    pub fn modifiers(&mut self, modifiers: Modifiers) -> Dispatched {
        self.send(0, NativeEventKind::Modifiers(modifiers))
    }

    /// Resize the window and deliver the resize event.
    pub fn resize(&mut self, width: u32, height: u32) -> Dispatched {
        self.window.resize(width, height);
        self.send(
            0,
            NativeEventKind::Resized {
                size: PhysicalSize::new(width, height),
            },
        )
    }

    pub fn refresh(&mut self) -> Result<PaintOutcome, HostError> {
        self.host.refresh(self.id)
    }

    /// Every call made into the element tree so far, without draw calls.
    pub fn calls(&self) -> Vec<ViewCall> {
        self.all_calls()
            .into_iter()
            .filter(|call| !matches!(call, ViewCall::Draw { .. }))
            .collect()
    }

    /// Every call made into the element tree so far.
    pub fn all_calls(&self) -> Vec<ViewCall> {
        self.view
            .as_ref()
            .map(|view| view.borrow().calls.clone())
            .unwrap_or_default()
    }

    pub fn clear_calls(&mut self) {
        if let Some(view) = &self.view {
            view.borrow_mut().calls.clear();
        }
    }

    pub fn clicks(&self) -> Vec<ButtonEvent> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ViewCall::Click(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    pub fn keys(&self) -> Vec<KeyEvent> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ViewCall::Key(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    pub fn scrolls(&self) -> Vec<Vec2> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ViewCall::Scroll(delta, _) => Some(delta),
                _ => None,
            })
            .collect()
    }

    pub fn draw_count(&self) -> usize {
        self.all_calls()
            .iter()
            .filter(|call| matches!(call, ViewCall::Draw { .. }))
            .count()
    }

    /// Run `f` against the recording view, e.g. to change what it returns.
    pub fn with_view<R>(&self, f: impl FnOnce(&mut RecordingView) -> R) -> Option<R> {
        self.view.as_ref().map(|view| f(&mut view.borrow_mut()))
    }

    /// Drop the element tree. The host notices on the next event or
    /// refresh for the window.
    pub fn drop_view(&mut self) {
        self.view = None;
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
