//! Presentation targets for the view host.
//!
//! The draw pipeline renders into a CPU-side drawing surface, copies the
//! result into a [`Texture`] and hands that texture to a [`Presenter`], which
//! is responsible for getting the pixels onto the screen.
//!
//! [`SoftbufferPresenter`] is the presenter used for real windows. Tests use
//! their own in-memory presenters through the same trait.

use std::num::NonZeroU32;

use anyhow::{Result, anyhow};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use softbuffer::{Context, Surface};

/// Rows of a [`Texture`] are padded to a multiple of this many pixels, the
/// same way streaming textures are pitched by most drivers.
pub const ROW_ALIGNMENT: usize = 16;

/// A streaming texture in `0RGB` format (`0x00RRGGBB` per pixel).
///
/// The row stride is at least the width and may be larger; writers must
/// go through [`TextureLock`] and respect [`TextureLock::stride`].
pub struct Texture {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    stride: usize,
}

impl Texture {
    /// Allocate a texture of `width` x `height` pixels.
    ///
    /// Fails on zero-sized requests and when the allocation itself cannot be
    /// satisfied; the caller is expected to skip the frame in that case.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(anyhow!("unable to create a {width}x{height} texture"));
        }
        let stride = (width as usize).next_multiple_of(ROW_ALIGNMENT);
        let len = stride
            .checked_mul(height as usize)
            .ok_or_else(|| anyhow!("texture size overflow: {width}x{height}"))?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|err| anyhow!("unable to allocate texture memory: {err}"))?;
        pixels.resize(len, 0);

        Ok(Self {
            pixels,
            width,
            height,
            stride,
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels between the start of two consecutive rows.
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// The visible pixels of row `y`.
    pub fn row(&self, y: usize) -> &[u32] {
        let start = y * self.stride;
        &self.pixels[start..start + self.width as usize]
    }

    /// Lock the backing memory for writing. The lock is released on drop.
    pub fn lock(&mut self) -> TextureLock<'_> {
        TextureLock {
            pixels: &mut self.pixels,
            width: self.width as usize,
            stride: self.stride,
        }
    }
}

/// Write access to the memory of a [`Texture`].
pub struct TextureLock<'a> {
    pixels: &'a mut [u32],
    width: usize,
    stride: usize,
}

impl TextureLock<'_> {
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// The visible pixels of row `y`, without the stride padding.
    pub fn row_mut(&mut self, y: usize) -> &mut [u32] {
        let start = y * self.stride;
        &mut self.pixels[start..start + self.width]
    }
}

/// Copies the top-left `width` x `height` region of `texture` into `dst`,
/// a buffer whose rows are `dst_stride` pixels apart.
pub fn blit_rows(texture: &Texture, dst: &mut [u32], dst_stride: usize, width: u32, height: u32) {
    let cols = (width.min(texture.width()) as usize).min(dst_stride);
    let rows = height.min(texture.height()) as usize;
    for y in 0..rows {
        let start = y * dst_stride;
        let Some(out) = dst.get_mut(start..start + cols) else {
            break;
        };
        out.copy_from_slice(&texture.row(y)[..cols]);
    }
}

/// Something that can put a [`Texture`] on screen.
pub trait Presenter {
    /// Allocate a texture this presenter is able to present.
    fn create_texture(&mut self, width: u32, height: u32) -> Result<Texture> {
        Texture::new(width, height)
    }

    /// Clear the target, blit the top-left `width` x `height` region of
    /// `texture` so it fills the window, and present.
    fn present(&mut self, texture: &Texture, width: u32, height: u32) -> Result<()>;

    fn debug_info(&self) -> String;
}

/// Presents textures through a [`softbuffer::Surface`] attached to a window.
pub struct SoftbufferPresenter<W> {
    #[allow(unused)]
    context: Context<W>,
    surface: Surface<W, W>,
    size: Option<(NonZeroU32, NonZeroU32)>,
}

impl<W: HasWindowHandle + HasDisplayHandle> SoftbufferPresenter<W> {
    pub fn new(window: W) -> Result<Self>
    where
        W: Clone,
    {
        let context = Context::new(window.clone())
            .map_err(|err| anyhow!("unable to create context: {}", err))?;
        let surface = Surface::new(&context, window)
            .map_err(|err| anyhow!("unable to create surface: {}", err))?;

        Ok(Self {
            context,
            surface,
            size: None,
        })
    }
}

impl<W: HasWindowHandle + HasDisplayHandle> Presenter for SoftbufferPresenter<W> {
    fn present(&mut self, texture: &Texture, width: u32, height: u32) -> Result<()> {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };

        if self.size != Some((w, h)) {
            self.surface
                .resize(w, h)
                .map_err(|err| anyhow!("failed to resize surface: {}", err))?;
            self.size = Some((w, h));
            tracing::debug!(width, height, "resized presentation surface");
        }

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|err| anyhow!("failed to get the surface buffer: {}", err))?;

        buffer.fill(0);
        blit_rows(texture, &mut buffer, width as usize, width, height);

        buffer
            .present()
            .map_err(|err| anyhow!("failed to present the surface buffer: {}", err))
    }

    fn debug_info(&self) -> String {
        match self.size {
            Some((w, h)) => format!("name: softbuffer\nsize: {w}x{h}"),
            None => "name: softbuffer\nsize: unset".to_string(),
        }
    }
}
