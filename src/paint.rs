//! The draw/present pipeline of a window.
//!
//! Every frame the element tree renders into a CPU-side [`DrawingSurface`],
//! the surface is copied row by row into a streaming [`Texture`] and the
//! texture is handed to the window's [`Presenter`].
//!
//! Surface and texture only ever grow. They are reallocated when the window
//! becomes wider or taller than anything seen before, and otherwise reused
//! even when they are larger than the window, so resize jitter does not
//! reallocate every frame.

use anyhow::{Result, anyhow};
use peniko::kurbo::Rect;
use tiny_skia::{Pixmap, PremultipliedColorU8};
use view_host_present::{Presenter, Texture, TextureLock};
use winit::dpi::PhysicalSize;

use crate::{element::ElementView, host_window::HostWindow};

/// CPU-addressable image the element tree draws into.
pub struct DrawingSurface {
    pixmap: Pixmap,
}

impl DrawingSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("unable to create a {width}x{height} pixmap"))?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Number of pixels between the start of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.pixmap.width() as usize
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

/// What happened to a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    Presented,
    /// The frame was dropped, either because the window has no area or
    /// because a resource could not be created. The next paint retries.
    Skipped,
}

struct FrameBuffers {
    surface: DrawingSurface,
    texture: Texture,
}

/// Per-window presenter, surface and texture, created lazily.
#[derive(Default)]
pub(crate) struct FramePipeline {
    presenter: Option<Box<dyn Presenter>>,
    buffers: Option<FrameBuffers>,
    watermark: PhysicalSize<u32>,
}

impl FramePipeline {
    /// The largest extent the buffers have been sized for.
    pub(crate) fn watermark(&self) -> PhysicalSize<u32> {
        self.watermark
    }

    pub(crate) fn surface_size(&self) -> Option<PhysicalSize<u32>> {
        self.buffers
            .as_ref()
            .map(|b| PhysicalSize::new(b.surface.width(), b.surface.height()))
    }

    pub(crate) fn paint(
        &mut self,
        window: &dyn HostWindow,
        view: &mut dyn ElementView,
    ) -> PaintOutcome {
        match self.try_paint(window, view) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(window = ?window.id(), "skipping frame: {err:#}");
                PaintOutcome::Skipped
            }
        }
    }

    fn try_paint(
        &mut self,
        window: &dyn HostWindow,
        view: &mut dyn ElementView,
    ) -> Result<PaintOutcome> {
        if self.presenter.is_none() {
            let presenter = window.create_presenter()?;
            tracing::debug!(window = ?window.id(), "created presenter\n{}", presenter.debug_info());
            self.presenter = Some(presenter);
        }
        let Self {
            presenter,
            buffers,
            watermark,
        } = self;
        let presenter = presenter
            .as_deref_mut()
            .ok_or_else(|| anyhow!("presenter missing"))?;

        let size = window.surface_size();
        if size.width == 0 || size.height == 0 {
            tracing::trace!(window = ?window.id(), "window has no area, nothing to paint");
            return Ok(PaintOutcome::Skipped);
        }

        let FrameBuffers { surface, texture } = ensure_capacity(buffers, watermark, presenter, size)?;

        let (width, height) = (size.width, size.height);
        view.draw(surface, Rect::new(0.0, 0.0, width as f64, height as f64));

        copy_rows(
            surface.pixmap().pixels(),
            surface.stride(),
            &mut texture.lock(),
            width,
            height,
        );

        presenter.present(texture, width, height)?;
        Ok(PaintOutcome::Presented)
    }

    /// Drop the presenter and both buffers.
    pub(crate) fn release(&mut self) {
        self.buffers = None;
        self.presenter = None;
        self.watermark = PhysicalSize::new(0, 0);
    }
}

/// Make sure the buffers cover `size`, growing them past the watermark if
/// needed. The old pair is released before the new one is allocated; if the
/// allocation fails the watermark is left alone so the next frame retries.
///
/// New buffers take the per-axis maximum of `size` and the watermark rather
/// than `size` itself. A window that grows wider while getting shorter keeps
/// its height capacity, so shrinking back along that axis never reallocates.
/// Only the top-left `size` region is drawn and presented.
fn ensure_capacity<'a>(
    buffers: &'a mut Option<FrameBuffers>,
    watermark: &mut PhysicalSize<u32>,
    presenter: &mut dyn Presenter,
    size: PhysicalSize<u32>,
) -> Result<&'a mut FrameBuffers> {
    let grown = size.width > watermark.width || size.height > watermark.height;
    if grown || buffers.is_none() {
        *buffers = None;

        let target = PhysicalSize::new(
            size.width.max(watermark.width),
            size.height.max(watermark.height),
        );
        let surface = DrawingSurface::new(target.width, target.height)?;
        let texture = presenter.create_texture(target.width, target.height)?;
        tracing::debug!(
            width = target.width,
            height = target.height,
            "allocated drawing surface and texture"
        );

        *watermark = target;
        *buffers = Some(FrameBuffers { surface, texture });
    }
    buffers
        .as_mut()
        .ok_or_else(|| anyhow!("frame buffers missing"))
}

/// Copy the top-left `width` x `height` pixels of a premultiplied RGBA image
/// with rows `src_stride` pixels apart into a `0RGB` texture.
pub(crate) fn copy_rows(
    src: &[PremultipliedColorU8],
    src_stride: usize,
    dst: &mut TextureLock<'_>,
    width: u32,
    height: u32,
) {
    let width = width as usize;
    for y in 0..height as usize {
        let start = y * src_stride;
        let Some(row) = src.get(start..start + width) else {
            break;
        };
        for (out_pixel, pixel) in dst.row_mut(y).iter_mut().zip(row) {
            *out_pixel = ((pixel.red() as u32) << 16)
                | ((pixel.green() as u32) << 8)
                | (pixel.blue() as u32);
        }
    }
}
