use std::sync::OnceLock;

use winit::cursor::CursorIcon;

use crate::host_window::HostWindow;

/// The cursor shapes an element tree can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorType {
    Arrow,
    IBeam,
    CrossHair,
    Hand,
    HResize,
    VResize,
}

impl CursorType {
    pub const ALL: [CursorType; 6] = [
        CursorType::Arrow,
        CursorType::IBeam,
        CursorType::CrossHair,
        CursorType::Hand,
        CursorType::HResize,
        CursorType::VResize,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// The platform cursor for this shape. The table is built on first use
    /// and shared by every window.
    pub fn icon(self) -> CursorIcon {
        static ICONS: OnceLock<[CursorIcon; 6]> = OnceLock::new();
        ICONS.get_or_init(|| {
            CursorType::ALL.map(|cursor| match cursor {
                CursorType::Arrow => CursorIcon::Default,
                CursorType::IBeam => CursorIcon::Text,
                CursorType::CrossHair => CursorIcon::Crosshair,
                CursorType::Hand => CursorIcon::Pointer,
                CursorType::HResize => CursorIcon::EwResize,
                CursorType::VResize => CursorIcon::NsResize,
            })
        })[self.index()]
    }
}

/// Show `cursor` over `window`.
pub fn set_cursor(window: &dyn HostWindow, cursor: CursorType) {
    window.set_cursor_icon(cursor.icon());
}
