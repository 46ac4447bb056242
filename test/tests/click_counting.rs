//! Tests for button handling.
//!
//! These tests verify that:
//! - Click counts grow for presses within the multi-click interval
//! - A slow press restarts the count at 1
//! - Motion with a button held is delivered as drag, not hover
//! - Releasing the button ends the drag

use view_host_test::prelude::*;

// =============================================================================
// Click Count Tests
// =============================================================================

/// Presses at 0, +50ms and +500ms count 1, 2, 1.
#[test]
fn test_click_count_scenario() {
    let mut harness = TestHarness::new_with_size(400, 300);

    harness.button_down(0, 10.0, 10.0);
    assert_eq!(
        harness.clicks(),
        vec![ButtonEvent {
            down: true,
            click_count: 1,
            button: MouseButton::Left,
            modifiers: Modifiers::empty(),
            pos: Point::new(10.0, 10.0),
        }]
    );

    harness.button_down(50, 10.0, 10.0);
    assert_eq!(harness.clicks()[1].click_count, 2);

    harness.button_down(500, 10.0, 10.0);
    assert_eq!(harness.clicks()[2].click_count, 1);
}

/// The count follows the interval rule for an arbitrary press sequence.
#[test]
fn test_click_count_follows_interval_rule() {
    let times = [0, 150, 300, 700, 899, 1100, 1300, 1301, 1502];
    let mut harness = TestHarness::new();

    for &ms in &times {
        harness.button_down(ms, 5.0, 5.0);
        harness.button_up(ms + 1, 5.0, 5.0);
    }

    let downs: Vec<u32> = harness
        .clicks()
        .iter()
        .filter(|e| e.down)
        .map(|e| e.click_count)
        .collect();

    let mut expected: Vec<u32> = Vec::new();
    for (i, &ms) in times.iter().enumerate() {
        let count = if i > 0 && ms - times[i - 1] <= 200 {
            expected[i - 1] + 1
        } else {
            1
        };
        expected.push(count);
    }
    assert_eq!(downs, expected);
    assert_eq!(downs, vec![1, 2, 3, 1, 2, 1, 2, 3, 1]);
}

/// A press exactly at the interval boundary still continues the sequence.
#[test]
fn test_click_at_interval_boundary_counts() {
    let mut harness = TestHarness::new();
    harness.button_down(0, 1.0, 1.0);
    harness.button_down(200, 1.0, 1.0);
    harness.button_down(401, 1.0, 1.0);

    let counts: Vec<u32> = harness.clicks().iter().map(|e| e.click_count).collect();
    assert_eq!(counts, vec![1, 2, 1]);
}

/// Releases carry the count of the press they end.
#[test]
fn test_release_reports_current_count() {
    let mut harness = TestHarness::new();
    harness.double_click(0, 3.0, 4.0);

    let clicks = harness.clicks();
    assert_eq!(clicks.len(), 4);
    assert!(!clicks[3].down);
    assert_eq!(clicks[3].click_count, 2);
    assert_eq!(clicks[3].pos, Point::new(3.0, 4.0));
}

/// A custom interval changes what counts as a double click.
#[test]
fn test_custom_multi_click_interval() {
    let config = HostConfig::default().multi_click_interval(std::time::Duration::from_millis(500));
    let mut harness = TestHarness::with_config(config, 100, 100).unwrap();

    harness.button_down(0, 1.0, 1.0);
    harness.button_down(450, 1.0, 1.0);
    assert_eq!(harness.clicks()[1].click_count, 2);
}

/// Button identity and modifiers are passed through.
#[test]
fn test_button_and_modifiers_delivered() {
    let mut harness = TestHarness::new();
    harness.modifiers(Modifiers::SHIFT);
    harness.button(0, MouseButton::Right, true, 7.0, 8.0);

    let click = harness.clicks()[0];
    assert_eq!(click.button, MouseButton::Right);
    assert_eq!(click.modifiers, Modifiers::SHIFT);
}

// =============================================================================
// Drag Tests
// =============================================================================

/// Motion between press and release is delivered as drag events.
#[test]
fn test_motion_while_pressed_is_drag() {
    let mut harness = TestHarness::new();
    harness.drag(0, MouseButton::Middle, (10.0, 10.0), (40.0, 10.0), 3);

    let calls = harness.calls();
    let drags: Vec<ButtonEvent> = calls
        .iter()
        .filter_map(|call| match call {
            ViewCall::Drag(event) => Some(*event),
            _ => None,
        })
        .collect();

    assert_eq!(drags.len(), 3);
    assert_eq!(drags[2].pos, Point::new(40.0, 10.0));
    assert!(drags.iter().all(|d| d.button == MouseButton::Middle && d.down));
    assert!(
        !calls.iter().any(|call| matches!(call, ViewCall::Cursor(..))),
        "no hover while dragging"
    );
    assert!(!harness.state().unwrap().gestures().is_dragging());
}

/// After the release, motion is hover again.
#[test]
fn test_motion_after_release_is_hover() {
    let mut harness = TestHarness::new();
    harness.click_at(0, 10.0, 10.0);
    harness.clear_calls();

    harness.motion(20, 12.0, 12.0);
    assert_eq!(
        harness.calls(),
        vec![ViewCall::Cursor(Point::new(12.0, 12.0), CursorTracking::Entering)]
    );
}

/// Drag positions update the position reported by the host.
#[test]
fn test_drag_updates_cursor_position() {
    let mut harness = TestHarness::new();
    harness.button_down(0, 1.0, 1.0);
    harness.motion(10, 30.0, 20.0);

    let id = harness.id();
    assert_eq!(harness.host().cursor_pos(id).unwrap(), Point::new(30.0, 20.0));
}
