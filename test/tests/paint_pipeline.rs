//! Tests for the draw/present pipeline.
//!
//! These tests verify that:
//! - Buffers are reallocated only when the window grows past the watermark
//! - Every routed event repaints the window
//! - Frames are skipped, not failed, when resources cannot be created
//! - The drawn image reaches the presenter

use view_host_test::prelude::*;

// =============================================================================
// Watermark Tests
// =============================================================================

/// 100 -> 200 -> 150 -> 250 reallocates on the first and third resize only.
#[test]
fn test_reallocation_only_on_growth() {
    let mut harness = TestHarness::new_with_size(100, 100);
    harness.refresh().unwrap();

    harness.resize(200, 200);
    harness.resize(150, 150);
    harness.resize(250, 250);

    let log = harness.window().presenter_log();
    assert_eq!(log.textures, vec![(100, 100), (200, 200), (250, 250)]);
    assert_eq!(
        log.frames,
        vec![(100, 100), (200, 200), (150, 150), (250, 250)]
    );
    assert_eq!(log.presenters, 1);
}

/// Shrinking keeps the larger buffers and draws into a sub-rectangle.
#[test]
fn test_shrink_reuses_buffers() {
    let mut harness = TestHarness::new_with_size(200, 200);
    harness.refresh().unwrap();
    harness.resize(150, 120);

    let state = harness.state().unwrap();
    assert_eq!(state.surface_size().map(|s| (s.width, s.height)), Some((200, 200)));
    let watermark = state.watermark();
    assert_eq!((watermark.width, watermark.height), (200, 200));

    let last_draw = harness.all_calls().into_iter().rev().find_map(|call| match call {
        ViewCall::Draw { rect, surface } => Some((rect, surface)),
        _ => None,
    });
    assert_eq!(
        last_draw,
        Some((Rect::new(0.0, 0.0, 150.0, 120.0), (200, 200)))
    );
}

/// Growth on one axis keeps the larger extent of the other.
#[test]
fn test_watermark_grows_per_axis() {
    let mut harness = TestHarness::new_with_size(300, 100);
    harness.refresh().unwrap();
    harness.resize(100, 300);

    assert_eq!(
        harness.window().presenter_log().textures,
        vec![(300, 100), (300, 300)]
    );
}

// =============================================================================
// Repaint Tests
// =============================================================================

/// Every routed input event is followed by exactly one frame.
#[test]
fn test_every_event_repaints() {
    let mut harness = TestHarness::new();
    harness.motion(0, 1.0, 1.0);
    harness.key_up(10, KeyCode::KeyZ);
    harness.send(20, NativeEventKind::Exposed);
    harness.send(30, NativeEventKind::Other);

    assert_eq!(harness.draw_count(), 4);
    assert_eq!(harness.window().presenter_log().frames.len(), 4);
}

/// Refreshing an area repaints the whole window.
#[test]
fn test_refresh_area_repaints_whole_window() {
    let mut harness = TestHarness::new_with_size(80, 60);
    let id = harness.id();
    let outcome = harness
        .host_mut()
        .refresh_area(id, Rect::new(10.0, 10.0, 20.0, 20.0))
        .unwrap();

    assert_eq!(outcome, PaintOutcome::Presented);
    assert_eq!(harness.window().presenter_log().frames, vec![(80, 60)]);
}

/// The drawn pixels are what gets presented.
#[test]
fn test_drawn_pixels_are_presented() {
    let mut harness = TestHarness::new_with_size(16, 16);
    harness.refresh().unwrap();
    assert_eq!(harness.window().presenter_log().last_pixel, Some(0x0020_4080));
}

// =============================================================================
// Failure Tests
// =============================================================================

/// A window without area is not painted.
#[test]
fn test_zero_area_skips_frame() {
    let mut harness = TestHarness::new_with_size(100, 100);
    let dispatched = harness.resize(0, 100);

    assert_eq!(dispatched, Dispatched::Handled(PaintOutcome::Skipped));
    assert_eq!(harness.draw_count(), 0);
    assert!(harness.window().presenter_log().textures.is_empty());
}

/// A failed presenter creation skips the frame and is retried next time.
#[test]
fn test_presenter_failure_retried() {
    let mut harness = TestHarness::new();
    harness.window().fail_presenters(1);

    assert_eq!(harness.refresh().unwrap(), PaintOutcome::Skipped);
    assert_eq!(harness.draw_count(), 0);

    assert_eq!(harness.refresh().unwrap(), PaintOutcome::Presented);
    assert_eq!(harness.window().presenter_log().presenters, 1);
}

/// A failed texture allocation leaves the watermark alone.
#[test]
fn test_texture_failure_retried() {
    let mut harness = TestHarness::new_with_size(64, 32);
    harness.window().fail_textures(1);

    assert_eq!(harness.refresh().unwrap(), PaintOutcome::Skipped);
    let watermark = harness.state().unwrap().watermark();
    assert_eq!((watermark.width, watermark.height), (0, 0));

    assert_eq!(harness.refresh().unwrap(), PaintOutcome::Presented);
    assert_eq!(harness.window().presenter_log().textures, vec![(64, 32)]);
}

/// Refreshing a window the host does not know is an error.
#[test]
fn test_refresh_unknown_window() {
    let mut harness = TestHarness::new();
    let mut other = Host::default();
    let tracker = ViewTracker::new();
    let (foreign, _window) = tracker.open(&mut other, 10, 10);

    assert!(matches!(
        harness.host_mut().refresh(foreign),
        Err(HostError::UnknownWindow(id)) if id == foreign
    ));
}
