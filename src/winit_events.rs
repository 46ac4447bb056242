//! Conversion of winit window events into [`NativeEvent`]s.

use std::time::Instant;

use peniko::kurbo::{Point, Vec2};
use rustc_hash::FxHashMap;
use winit::{
    dpi::PhysicalPosition,
    event::{
        ButtonSource, ElementState, MouseButton as WinitMouseButton, MouseScrollDelta,
        PointerSource, WindowEvent,
    },
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
    window::WindowId,
};

use crate::{
    keyboard::{KeyCode, Modifiers},
    native::{NativeEvent, NativeEventKind},
};

/// Translates winit events one window at a time.
///
/// Winit does not attach a position to wheel events, so the adapter keeps the
/// last pointer position it saw for every window.
#[derive(Debug)]
pub struct WinitEventAdapter {
    pointer: FxHashMap<WindowId, Point>,
    pixels_per_line: f64,
}

impl WinitEventAdapter {
    pub fn new(pixels_per_line: f64) -> Self {
        Self {
            pointer: FxHashMap::default(),
            pixels_per_line,
        }
    }

    /// Convert `event` observed at `time` and hand the results to `emit`.
    ///
    /// Most events produce exactly one native event. A key press carrying
    /// committed text produces the key event followed by a text event, and
    /// synthetic key events produce nothing.
    pub fn translate(
        &mut self,
        window: WindowId,
        event: &WindowEvent,
        time: Instant,
        mut emit: impl FnMut(NativeEvent),
    ) {
        let mut send = |kind| emit(NativeEvent::new(window, time, kind));

        match event {
            WindowEvent::KeyboardInput {
                event,
                is_synthetic,
                ..
            } => {
                if *is_synthetic {
                    return;
                }
                let code = match event.physical_key {
                    PhysicalKey::Code(code) => from_winit_key_code(code),
                    _ => KeyCode::Unidentified,
                };
                let pressed = event.state == ElementState::Pressed;
                send(NativeEventKind::Key { code, pressed });
                if pressed && let Some(text) = event.text.as_deref().and_then(committed_text) {
                    send(NativeEventKind::Text(text));
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                send(NativeEventKind::Modifiers(from_winit_modifiers(
                    modifiers.state(),
                )));
            }
            WindowEvent::PointerButton {
                state,
                button: ButtonSource::Mouse(button),
                position,
                ..
            } => send(self.pointer_button(window, *state, *button, *position)),
            WindowEvent::PointerMoved {
                position,
                source: PointerSource::Mouse,
                ..
            } => send(self.pointer_moved(window, *position)),
            WindowEvent::PointerEntered { position, .. } => {
                send(self.pointer_entered(window, *position))
            }
            WindowEvent::PointerLeft { position, .. } => send(self.pointer_left(window, *position)),
            WindowEvent::MouseWheel { delta, .. } => send(self.wheel(window, *delta)),
            WindowEvent::SurfaceResized(size) => {
                send(NativeEventKind::Resized { size: *size });
            }
            WindowEvent::RedrawRequested => send(NativeEventKind::Exposed),
            WindowEvent::CloseRequested => send(NativeEventKind::CloseRequested),
            WindowEvent::Destroyed => send(NativeEventKind::Destroyed),
            _ => send(NativeEventKind::Other),
        }
    }

    pub fn pointer_button(
        &mut self,
        window: WindowId,
        state: ElementState,
        button: WinitMouseButton,
        position: PhysicalPosition<f64>,
    ) -> NativeEventKind {
        let pos = self.track(window, position);
        NativeEventKind::Button {
            button: button.into(),
            pressed: state == ElementState::Pressed,
            pos,
        }
    }

    pub fn pointer_moved(&mut self, window: WindowId, position: PhysicalPosition<f64>) -> NativeEventKind {
        NativeEventKind::Motion {
            pos: self.track(window, position),
        }
    }

    pub fn pointer_entered(
        &mut self,
        window: WindowId,
        position: PhysicalPosition<f64>,
    ) -> NativeEventKind {
        NativeEventKind::PointerEntered {
            pos: self.track(window, position),
        }
    }

    /// Some platforms report no position when the pointer leaves.
    pub fn pointer_left(
        &mut self,
        window: WindowId,
        position: Option<PhysicalPosition<f64>>,
    ) -> NativeEventKind {
        NativeEventKind::PointerLeft {
            pos: position.map(|position| self.track(window, position)),
        }
    }

    /// Line deltas pass through, pixel deltas are converted to lines. The
    /// event is placed at the last pointer position seen for `window`.
    pub fn wheel(&self, window: WindowId, delta: MouseScrollDelta) -> NativeEventKind {
        let delta = match delta {
            MouseScrollDelta::LineDelta(x, y) => Vec2::new(x as f64, y as f64),
            MouseScrollDelta::PixelDelta(p) => Vec2::new(p.x, p.y) / self.pixels_per_line,
        };
        NativeEventKind::Wheel {
            delta,
            pos: self.pointer_position(window),
        }
    }

    fn track(&mut self, window: WindowId, position: PhysicalPosition<f64>) -> Point {
        let pos = Point::new(position.x, position.y);
        self.pointer.insert(window, pos);
        pos
    }

    /// Last pointer position seen for `window`, or the origin.
    pub fn pointer_position(&self, window: WindowId) -> Point {
        self.pointer.get(&window).copied().unwrap_or(Point::ZERO)
    }

    /// Drop everything remembered about `window`.
    pub fn forget(&mut self, window: WindowId) {
        self.pointer.remove(&window);
    }
}

/// The printable part of text committed with a key press. Keys like Enter,
/// Tab, Backspace and Escape commit control characters, which are key
/// events rather than typed text.
fn committed_text(text: &str) -> Option<String> {
    let text: String = text.chars().filter(|c| !c.is_control()).collect();
    (!text.is_empty()).then_some(text)
}

/// Control also sets [`Modifiers::ACTION`].
pub fn from_winit_modifiers(state: ModifiersState) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, state.shift_key());
    modifiers.set(Modifiers::CONTROL | Modifiers::ACTION, state.control_key());
    modifiers.set(Modifiers::ALT, state.alt_key());
    modifiers.set(Modifiers::SUPER, state.meta_key());
    modifiers
}

macro_rules! same_name_codes {
    ($code:expr; $($name:ident),* $(,)?) => {
        match $code {
            $(WinitKeyCode::$name => KeyCode::$name,)*
            _ => KeyCode::Unidentified,
        }
    };
}

/// Map a winit physical key to the portable key code. Keys outside the
/// recognized set become [`KeyCode::Unidentified`].
pub fn from_winit_key_code(code: WinitKeyCode) -> KeyCode {
    same_name_codes!(code;
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
        KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
        Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
        F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
        F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24,
        ShiftLeft, ShiftRight, ControlLeft, ControlRight, AltLeft, AltRight,
        MetaLeft, MetaRight, CapsLock, NumLock, ScrollLock,
        Enter, Escape, Backspace, Tab, Space, ContextMenu,
        ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
        Home, End, PageUp, PageDown, Insert, Delete,
        PrintScreen, Pause,
        Backquote, Minus, Equal, BracketLeft, BracketRight, Backslash,
        IntlBackslash, IntlRo, IntlYen,
        Semicolon, Quote, Comma, Period, Slash,
        Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
        Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
        NumpadAdd, NumpadSubtract, NumpadMultiply, NumpadDivide,
        NumpadDecimal, NumpadEnter, NumpadEqual, NumpadComma,
        AudioVolumeDown, AudioVolumeUp, AudioVolumeMute,
        MediaPlayPause, MediaStop, MediaTrackNext, MediaTrackPrevious,
        BrowserBack, BrowserForward,
    )
}
