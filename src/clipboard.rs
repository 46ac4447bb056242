use parking_lot::Mutex;
use raw_window_handle::RawDisplayHandle;

#[cfg(not(any(target_os = "macos", windows, target_arch = "wasm32")))]
use copypasta::{
    wayland_clipboard,
    x11_clipboard::{Primary as X11SelectionClipboard, X11ClipboardContext},
};

use copypasta::{ClipboardContext, ClipboardProvider};

static CLIPBOARD: Mutex<Option<Clipboard>> = Mutex::new(None);

/// The process clipboard, exchanging UTF-8 text.
pub struct Clipboard {
    clipboard: Box<dyn ClipboardProvider>,
    /// The primary selection, where the platform has one.
    selection: Option<Box<dyn ClipboardProvider>>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard not available")]
    NotAvailable,
    #[error("clipboard provider error: {0}")]
    ProviderError(String),
}

impl Clipboard {
    pub fn get_contents() -> Result<String, ClipboardError> {
        CLIPBOARD
            .lock()
            .as_mut()
            .ok_or(ClipboardError::NotAvailable)?
            .clipboard
            .get_contents()
            .map_err(|e| ClipboardError::ProviderError(e.to_string()))
    }

    pub fn set_contents(s: String) -> Result<(), ClipboardError> {
        CLIPBOARD
            .lock()
            .as_mut()
            .ok_or(ClipboardError::NotAvailable)?
            .clipboard
            .set_contents(s)
            .map_err(|e| ClipboardError::ProviderError(e.to_string()))
    }

    /// Read the primary selection. Platforms without one report
    /// [`ClipboardError::NotAvailable`].
    pub fn get_selection_contents() -> Result<String, ClipboardError> {
        CLIPBOARD
            .lock()
            .as_mut()
            .and_then(|clipboard| clipboard.selection.as_mut())
            .ok_or(ClipboardError::NotAvailable)?
            .get_contents()
            .map_err(|e| ClipboardError::ProviderError(e.to_string()))
    }

    pub fn set_selection_contents(s: String) -> Result<(), ClipboardError> {
        CLIPBOARD
            .lock()
            .as_mut()
            .and_then(|clipboard| clipboard.selection.as_mut())
            .ok_or(ClipboardError::NotAvailable)?
            .set_contents(s)
            .map_err(|e| ClipboardError::ProviderError(e.to_string()))
    }

    pub fn is_initialized() -> bool {
        CLIPBOARD.lock().is_some()
    }

    /// Connect the process clipboard to `display`. Later calls replace the
    /// provider.
    ///
    /// # Safety
    /// The `display` must stay valid for the rest of the process.
    pub(crate) unsafe fn init(display: RawDisplayHandle) -> Result<(), ClipboardError> {
        let clipboard = unsafe { Self::new(display) }?;
        *CLIPBOARD.lock() = Some(clipboard);
        Ok(())
    }

    /// # Safety
    /// The `display` must be valid as long as the returned Clipboard exists.
    unsafe fn new(
        #[allow(unused_variables)] /* on some platforms */ display: RawDisplayHandle,
    ) -> Result<Self, ClipboardError> {
        let provider_error = |e: Box<dyn std::error::Error + Send + Sync>| {
            ClipboardError::ProviderError(e.to_string())
        };

        #[cfg(not(any(target_os = "macos", windows, target_arch = "wasm32")))]
        if let RawDisplayHandle::Wayland(display) = display {
            let (selection, clipboard) = unsafe {
                wayland_clipboard::create_clipboards_from_external(display.display.as_ptr())
            };
            return Ok(Self {
                clipboard: Box::new(clipboard),
                selection: Some(Box::new(selection)),
            });
        }

        #[cfg(not(any(target_os = "macos", windows, target_arch = "wasm32")))]
        return Ok(Self {
            clipboard: Box::new(ClipboardContext::new().map_err(provider_error)?),
            selection: Some(Box::new(
                X11ClipboardContext::<X11SelectionClipboard>::new().map_err(provider_error)?,
            )),
        });

        #[cfg(any(target_os = "macos", windows, target_arch = "wasm32"))]
        return Ok(Self {
            clipboard: Box::new(ClipboardContext::new().map_err(provider_error)?),
            selection: None,
        });
    }
}
