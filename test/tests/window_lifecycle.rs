//! Tests for window registration and routing.
//!
//! These tests verify that:
//! - Events for windows the host does not own are ignored
//! - Closing a window removes its state and releases its resources
//! - The host asks to exit once the last window has closed
//! - Events for a window whose element tree is gone are dropped

use std::time::{Duration, Instant};

use serial_test::serial;
use view_host::Clipboard;
use view_host::winit::{cursor::CursorIcon, window::WindowId};
use view_host_test::prelude::*;

// =============================================================================
// Routing
// =============================================================================

/// Events for an unregistered window are neither delivered nor painted.
#[test]
fn test_unroutable_event_is_ignored() {
    let mut harness = TestHarness::new();
    let stranger = WindowId::from_raw(usize::MAX - 1);

    let dispatched = harness.host_mut().dispatch(NativeEvent::new(
        stranger,
        Instant::now(),
        NativeEventKind::Button {
            button: MouseButton::Left,
            pressed: true,
            pos: Point::new(1.0, 1.0),
        },
    ));

    assert_eq!(dispatched, Dispatched::Unrouted);
    assert!(harness.all_calls().is_empty());
    assert!(harness.window().presenter_log().frames.is_empty());
}

/// Two windows keep separate input state.
#[test]
fn test_windows_have_independent_state() {
    let mut harness = TestHarness::new();
    let tracker = ViewTracker::new();
    let (second, _window) = tracker.open(harness.host_mut(), 200, 100);

    harness.button_down(0, 5.0, 5.0);
    let at = harness.at(50);
    harness.host_mut().dispatch(NativeEvent::new(
        second,
        at,
        NativeEventKind::Button {
            button: MouseButton::Left,
            pressed: true,
            pos: Point::new(5.0, 5.0),
        },
    ));

    let second_click = tracker.calls().into_iter().find_map(|call| match call {
        ViewCall::Click(event) => Some(event),
        _ => None,
    });
    assert_eq!(second_click.map(|c| c.click_count), Some(1));
    assert!(harness.state().unwrap().gestures().is_dragging());
    assert_eq!(harness.host().views().len(), 2);
}

// =============================================================================
// Teardown
// =============================================================================

/// A close request removes the window and releases its buffers.
#[test]
fn test_close_request_unregisters() {
    let mut harness = TestHarness::new();
    harness.refresh().unwrap();

    let dispatched = harness.send(10, NativeEventKind::CloseRequested);
    assert_eq!(dispatched, Dispatched::CloseRequested);
    assert!(harness.state().is_none());
    assert!(harness.host().should_exit());

    // Nothing is painted for the close request itself.
    assert_eq!(harness.draw_count(), 1);

    // The following destroy notification finds no state.
    assert_eq!(harness.send(20, NativeEventKind::Destroyed), Dispatched::Unrouted);
}

/// A host configured to stay alive does not ask to exit.
#[test]
fn test_exit_on_last_window_is_configurable() {
    let config = HostConfig::default().exit_on_last_window_closed(false);
    let mut harness = TestHarness::with_config(config, 50, 50).unwrap();
    harness.send(0, NativeEventKind::Destroyed);

    assert!(harness.state().is_none());
    assert!(!harness.host().should_exit());
}

/// Closing one of two windows keeps the host running.
#[test]
fn test_closing_one_of_two_windows() {
    let mut harness = TestHarness::new();
    let tracker = ViewTracker::new();
    let (second, _window) = tracker.open(harness.host_mut(), 20, 20);

    let id = harness.id();
    harness.host_mut().close_window(id).unwrap();
    assert!(!harness.host().should_exit());
    assert!(harness.host().view(second).is_some());

    assert!(matches!(
        harness.host_mut().close_window(id),
        Err(HostError::UnknownWindow(_))
    ));
}

/// Once the element tree is dropped, the next event releases the window's
/// state and its graphics resources.
#[test]
fn test_dropped_view_releases_state() {
    let mut harness = TestHarness::new();
    harness.refresh().unwrap();
    assert_eq!(harness.window().live_presenters(), 1);

    harness.drop_view();
    let dispatched = harness.button_down(0, 1.0, 1.0);

    assert_eq!(dispatched, Dispatched::ViewDropped);
    assert!(harness.state().is_none());
    assert_eq!(harness.window().live_presenters(), 0);
    assert!(harness.host().should_exit());

    assert_eq!(harness.button_down(10, 1.0, 1.0), Dispatched::Unrouted);
    assert_eq!(harness.window().presenter_log().frames.len(), 1);
}

/// A refresh also notices a dropped element tree.
#[test]
fn test_refresh_after_view_dropped() {
    let mut harness = TestHarness::new();
    let tracker = ViewTracker::new();
    let (second, _window) = tracker.open(harness.host_mut(), 20, 20);

    harness.drop_view();
    assert_eq!(harness.refresh().unwrap(), PaintOutcome::Skipped);
    assert!(harness.state().is_none());
    assert!(!harness.host().should_exit());
    assert!(harness.host().view(second).is_some());

    assert!(matches!(harness.refresh(), Err(HostError::UnknownWindow(_))));
}

/// Modifier changes are still delivered while the element tree lives.
#[test]
fn test_modifiers_tracked() {
    let mut harness = TestHarness::new();
    harness.modifiers(Modifiers::ALT);
    assert_eq!(harness.state().unwrap().modifiers(), Modifiers::ALT);
}

// =============================================================================
// Pass-throughs
// =============================================================================

/// Size queries and requests go straight to the window.
#[test]
fn test_size_pass_through() {
    let mut harness = TestHarness::new_with_size(320, 240);
    let id = harness.id();

    assert_eq!(harness.host().size(id).unwrap(), Size::new(320.0, 240.0));
    harness.host_mut().set_size(id, Size::new(640.0, 480.0)).unwrap();
    assert_eq!(harness.host().size(id).unwrap(), Size::new(640.0, 480.0));
    assert_eq!(harness.host().position(id).unwrap(), Some(Point::ZERO));

    assert!(matches!(
        harness.host().set_size(id, Size::new(0.0, 10.0)),
        Err(HostError::ZeroSizedSurface { width: 0, height: 10 })
    ));
}

/// Redraw requests are forwarded without painting.
#[test]
fn test_redraw_request_pass_through() {
    let mut harness = TestHarness::new();
    let id = harness.id();

    harness.host().request_redraw(id).unwrap();
    assert_eq!(harness.window().redraw_requests(), 1);
    assert_eq!(harness.draw_count(), 0);

    assert_eq!(harness.host().native_scale_factor(id).unwrap(), 1.0);
    assert_eq!(harness.host().hdpi_scale(), 1.0);
    assert_eq!(harness.host().scroll_direction(), Vec2::new(1.0, 1.0));
}

/// Setting the same cursor twice only touches the window once.
#[test]
fn test_cursor_applied_once() {
    let mut harness = TestHarness::new();
    let id = harness.id();

    harness.host_mut().set_cursor(id, CursorType::IBeam).unwrap();
    harness.host_mut().set_cursor(id, CursorType::IBeam).unwrap();
    harness.host_mut().set_cursor(id, CursorType::Hand).unwrap();

    assert_eq!(
        harness.window().cursors(),
        vec![CursorIcon::Text, CursorIcon::Pointer]
    );
    assert_eq!(harness.state().unwrap().last_cursor(), Some(CursorType::Hand));
}

/// Mock windows have no display, so the clipboard stays unavailable.
#[test]
#[serial]
fn test_clipboard_unavailable_without_display() {
    let _harness = TestHarness::new();
    if Clipboard::is_initialized() {
        return;
    }
    assert!(Clipboard::get_contents().is_err());
}

/// The configuration a host runs with can be read back.
#[test]
fn test_config_is_inspectable() {
    let config = HostConfig::default()
        .horizontal_scroll(true)
        .max_scroll_velocity(Some(3.0));
    let harness = TestHarness::with_config(config, 100, 100).unwrap();

    let config = harness.host().config();
    assert!(config.horizontal_scroll);
    assert_eq!(config.max_scroll_velocity, Some(3.0));
    assert_eq!(config.multi_click_interval, Duration::from_millis(200));
    assert_eq!(config.pixels_per_line, 20.0);
}

/// Invalid configuration is rejected up front.
#[test]
fn test_invalid_config_rejected() {
    let config = HostConfig::default().pixels_per_line(0.0);
    assert!(matches!(
        Host::new(config),
        Err(HostError::InvalidConfig(_))
    ));
}
