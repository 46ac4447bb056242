use bitflags::bitflags;
use rustc_hash::FxHashMap;

/// Portable physical key code. `KeyCode::Unidentified` stands for any key
/// the platform reported but the host could not map.
pub use ui_events::keyboard::Code as KeyCode;

bitflags! {
    /// Modifier keys held while an input event occurred.
    ///
    /// `ACTION` is the platform's command modifier and is set together with
    /// `CONTROL`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
        const ACTION = 1 << 4;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Release,
    Repeat,
}

/// A normalized key event as seen by the element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub action: KeyAction,
    pub modifiers: Modifiers,
}

/// A single Unicode scalar of committed text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEvent {
    pub codepoint: char,
    pub modifiers: Modifiers,
}

/// Last observed action per key for one window.
///
/// Keys that were never seen count as released.
#[derive(Debug, Default)]
pub struct KeyStateTracker {
    keys: FxHashMap<KeyCode, KeyAction>,
}

impl KeyStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last raw action recorded for `key`.
    pub fn state(&self, key: KeyCode) -> KeyAction {
        self.keys.get(&key).copied().unwrap_or(KeyAction::Release)
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.state(key) == KeyAction::Press
    }

    /// Record one raw key action and return the event to deliver, if any.
    ///
    /// A release of an already released key yields `None`. A press of an
    /// already pressed key is turned into a repeat. `KeyAction::Repeat` as
    /// input is treated as a press.
    pub fn normalize(
        &mut self,
        key: KeyCode,
        action: KeyAction,
        modifiers: Modifiers,
    ) -> Option<KeyEvent> {
        let action = match action {
            KeyAction::Repeat => KeyAction::Press,
            action => action,
        };
        let previous = self.state(key);

        if action == KeyAction::Release && previous == KeyAction::Release {
            return None;
        }
        self.keys.insert(key, action);

        let action = if action == KeyAction::Press && previous == KeyAction::Press {
            KeyAction::Repeat
        } else {
            action
        };
        Some(KeyEvent {
            key,
            action,
            modifiers,
        })
    }

    /// Track a native key action and deliver the resulting events.
    ///
    /// `deliver` is called once per normalized event and reports whether
    /// the element tree consumed it; the results are OR-ed together.
    ///
    /// Two platform quirks are corrected here. Releasing either shift key
    /// releases both, since the second release is not reported while both
    /// are held. Print screen may not report a key down, so any print screen
    /// event is delivered as a press immediately followed by a release.
    pub fn handle(
        &mut self,
        key: KeyCode,
        action: KeyAction,
        modifiers: Modifiers,
        mut deliver: impl FnMut(KeyEvent) -> bool,
    ) -> bool {
        if key == KeyCode::Unidentified {
            return false;
        }

        let mut step = |key: KeyCode, action: KeyAction| {
            self.normalize(key, action, modifiers).is_some_and(&mut deliver)
        };

        match (key, action) {
            (KeyCode::ShiftLeft | KeyCode::ShiftRight, KeyAction::Release) => {
                let left = step(KeyCode::ShiftLeft, KeyAction::Release);
                let right = step(KeyCode::ShiftRight, KeyAction::Release);
                left || right
            }
            (KeyCode::PrintScreen, _) => {
                let press = step(KeyCode::PrintScreen, KeyAction::Press);
                let release = step(KeyCode::PrintScreen, KeyAction::Release);
                press || release
            }
            _ => step(key, action),
        }
    }
}
