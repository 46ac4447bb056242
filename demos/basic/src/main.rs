use std::{cell::RefCell, rc::Rc};

use tracing_subscriber::EnvFilter;
use view_host::{
    ButtonEvent, CursorTracking, DrawingSurface, ElementView, Host, HostConfig, KeyAction,
    KeyCode, KeyEvent, TextEvent,
    kurbo::{Point, Rect, Vec2},
    tiny_skia::{Color, Paint, Rect as SkiaRect, Transform},
    winit::{
        application::ApplicationHandler,
        event::WindowEvent,
        event_loop::{ActiveEventLoop, EventLoop},
        window::WindowId,
    },
};

/// A column of stripes that follows the wheel and flashes on clicks.
#[derive(Default)]
struct Stripes {
    offset: f64,
    clicks: u32,
    pointer: Point,
    typed: String,
}

impl ElementView for Stripes {
    fn draw(&mut self, surface: &mut DrawingSurface, rect: Rect) {
        let shade = (self.clicks % 4) as u8 * 40;
        surface
            .pixmap_mut()
            .fill(Color::from_rgba8(0x18, 0x18, 0x20 + shade, 0xff));

        let mut paint = Paint::default();
        paint.set_color(Color::from_rgba8(0xe0, 0x90, 0x30, 0xff));
        let mut y = self.offset.rem_euclid(40.0) - 40.0;
        while y < rect.height() {
            if let Some(stripe) = SkiaRect::from_xywh(0.0, y as f32, rect.width() as f32, 12.0) {
                surface
                    .pixmap_mut()
                    .fill_rect(stripe, &paint, Transform::identity(), None);
            }
            y += 40.0;
        }

        paint.set_color(Color::WHITE);
        if let Some(dot) =
            SkiaRect::from_xywh(self.pointer.x as f32 - 3.0, self.pointer.y as f32 - 3.0, 6.0, 6.0)
        {
            surface
                .pixmap_mut()
                .fill_rect(dot, &paint, Transform::identity(), None);
        }
    }

    fn cursor(&mut self, pos: Point, tracking: CursorTracking) {
        self.pointer = pos;
        if tracking != CursorTracking::Hovering {
            tracing::debug!(?pos, ?tracking, "pointer crossed the window edge");
        }
    }

    fn click(&mut self, event: ButtonEvent) {
        if event.down {
            self.clicks += 1;
            tracing::info!(button = ?event.button, count = event.click_count, "click");
        }
    }

    fn drag(&mut self, event: ButtonEvent) {
        self.pointer = event.pos;
    }

    fn scroll(&mut self, delta: Vec2, _pos: Point) {
        self.offset += delta.y * 10.0;
    }

    fn key(&mut self, event: KeyEvent) -> bool {
        tracing::info!(key = ?event.key, action = ?event.action, "key");
        if event.key == KeyCode::Escape && event.action == KeyAction::Press {
            self.typed.clear();
            return true;
        }
        false
    }

    fn text(&mut self, event: TextEvent) {
        self.typed.push(event.codepoint);
        tracing::info!(typed = %self.typed, "text");
    }
}

struct Demo {
    host: Host,
    view: Rc<RefCell<dyn ElementView>>,
}

impl ApplicationHandler for Demo {
    fn can_create_surfaces(&mut self, event_loop: &dyn ActiveEventLoop) {
        if !self.host.views().is_empty() {
            return;
        }
        let bounds = Rect::new(100.0, 100.0, 740.0, 580.0);
        match self
            .host
            .open_window(event_loop, bounds, Rc::downgrade(&self.view))
        {
            Ok(id) => tracing::info!(window = ?id, "window opened"),
            Err(err) => {
                tracing::error!("failed to open window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &dyn ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        self.host.handle_window_event(event_loop, window_id, &event);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = HostConfig::default().horizontal_scroll(true);
    let mut demo = Demo {
        host: Host::new(config)?,
        view: Rc::new(RefCell::new(Stripes::default())),
    };

    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut demo)?;
    Ok(())
}
