//! Routing of native events to the owning window's state and element tree.

use peniko::kurbo::Vec2;

use crate::{
    config::HostConfig,
    element::ElementView,
    keyboard::{KeyAction, TextEvent},
    native::{NativeEvent, NativeEventKind},
    paint::PaintOutcome,
    registry::ViewRegistry,
    view_state::ViewState,
};

/// Pixel density applied to scroll positions. Always 1.0 for now; the
/// drawing surface is sized in physical pixels.
pub(crate) const HDPI_SCALE: f64 = 1.0;

/// What [`dispatch`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// No registered window owns the event.
    Unrouted,
    /// The event was delivered and the window repainted.
    Handled(PaintOutcome),
    /// The user asked to close the window. Nothing was delivered.
    CloseRequested,
    /// The native window is gone. Nothing was delivered.
    Destroyed,
    /// The element tree of the window was dropped. Its state has been
    /// unregistered and its graphics resources released.
    ViewDropped,
}

/// Route one native event.
///
/// Every routed event except the window lifecycle ones is followed by a
/// repaint of the window, whether or not the element tree reacted to it.
pub fn dispatch(views: &mut ViewRegistry, config: &HostConfig, event: &NativeEvent) -> Dispatched {
    let Some(state) = views.lookup_mut(event.window) else {
        tracing::trace!(window = ?event.window, kind = event.kind.name(), "ignoring event for unknown window");
        return Dispatched::Unrouted;
    };
    tracing::trace!(window = ?event.window, kind = event.kind.name(), "dispatching");

    match event.kind {
        NativeEventKind::CloseRequested => return Dispatched::CloseRequested,
        NativeEventKind::Destroyed => return Dispatched::Destroyed,
        _ => {}
    }

    let Some(owner) = state.owner.upgrade() else {
        tracing::debug!(window = ?event.window, "element tree dropped, releasing view state");
        views.unregister(event.window);
        return Dispatched::ViewDropped;
    };

    deliver(state, &mut *owner.borrow_mut(), config, event);
    Dispatched::Handled(state.paint())
}

fn deliver(
    state: &mut ViewState,
    view: &mut dyn ElementView,
    config: &HostConfig,
    event: &NativeEvent,
) {
    let modifiers = state.modifiers;

    match &event.kind {
        NativeEventKind::Key { code, pressed } => {
            let action = if *pressed {
                KeyAction::Press
            } else {
                KeyAction::Release
            };
            let consumed = state
                .keys
                .handle(*code, action, modifiers, |key| view.key(key));
            tracing::trace!(key = ?code, ?action, consumed);
        }
        NativeEventKind::Text(text) => {
            for codepoint in text.chars() {
                view.text(TextEvent {
                    codepoint,
                    modifiers,
                });
            }
        }
        NativeEventKind::Button {
            button,
            pressed,
            pos,
        } => {
            state.cursor.record(*pos);
            let click = state.gestures.button(
                *button,
                *pressed,
                *pos,
                modifiers,
                event.time,
                config.multi_click_interval,
            );
            view.click(click);
        }
        NativeEventKind::Motion { pos } => match state.gestures.drag(*pos, modifiers) {
            Some(drag) => {
                state.cursor.record(*pos);
                view.drag(drag);
            }
            None => {
                let (pos, tracking) = state.cursor.motion(*pos);
                view.cursor(pos, tracking);
            }
        },
        NativeEventKind::Wheel { delta, pos } => {
            let raw = if config.horizontal_scroll {
                *delta
            } else {
                Vec2::new(0.0, delta.y)
            };
            let delta = state.scroll.scroll(raw, event.time, config);
            view.scroll(delta, (pos.to_vec2() * HDPI_SCALE).to_point());
        }
        NativeEventKind::PointerEntered { pos } => {
            let (pos, tracking) = state.cursor.enter(*pos);
            view.cursor(pos, tracking);
        }
        NativeEventKind::PointerLeft { pos } => {
            let (pos, tracking) = state.cursor.leave(*pos);
            view.cursor(pos, tracking);
        }
        NativeEventKind::Modifiers(modifiers) => state.modifiers = *modifiers,
        NativeEventKind::Resized { .. }
        | NativeEventKind::Exposed
        | NativeEventKind::Other
        | NativeEventKind::CloseRequested
        | NativeEventKind::Destroyed => {}
    }
}
