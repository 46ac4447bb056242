use thiserror::Error;
use winit::window::WindowId;

/// Errors reported to the application layer.
///
/// Input handling and painting never produce these: unroutable events are
/// dropped and failed frames are skipped. Only explicit host calls such as
/// window construction or configuration can fail.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("invalid host configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to create window: {0}")]
    WindowCreation(String),

    #[error("surface has zero area ({width}x{height})")]
    ZeroSizedSurface { width: u32, height: u32 },

    #[error("window {0:?} is not registered with this host")]
    UnknownWindow(WindowId),
}
