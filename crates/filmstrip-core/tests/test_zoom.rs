use approx::assert_relative_eq;

use filmstrip_core::layout::Point;
use filmstrip_core::zoom::{clamp_pan, max_overflow, ZoomState};

const IMAGE: [f32; 2] = [400.0, 300.0];

// ---------------------------------------------------------------------------
// Overflow limits
// ---------------------------------------------------------------------------

#[test]
fn test_no_overflow_at_natural_size() {
    assert_eq!(max_overflow(1.0, 400.0), 0.0);
}

#[test]
fn test_overflow_is_half_the_extra_extent() {
    assert_relative_eq!(max_overflow(2.0, 400.0), 200.0);
    assert_relative_eq!(max_overflow(3.0, 300.0), 300.0);
}

#[test]
fn test_clamp_pan_boxes_both_axes() {
    let clamped = clamp_pan(Point::new(500.0, -500.0), 2.0, IMAGE);
    assert_relative_eq!(clamped.x, 200.0);
    assert_relative_eq!(clamped.y, -150.0);
}

#[test]
fn test_clamp_pan_passes_inside_values_through() {
    let clamped = clamp_pan(Point::new(-120.0, 60.0), 2.0, IMAGE);
    assert_eq!(clamped, Point::new(-120.0, 60.0));
}

// ---------------------------------------------------------------------------
// Scale state
// ---------------------------------------------------------------------------

#[test]
fn test_default_is_natural_size() {
    let zoom = ZoomState::default();
    assert_eq!(zoom.scale(), 1.0);
    assert_eq!(zoom.pan(), Point::default());
    assert!(!zoom.is_zoomed());
}

#[test]
fn test_set_scale_clamps_to_range() {
    let mut zoom = ZoomState::default();
    zoom.set_scale(10.0, 1.0, 5.0, IMAGE);
    assert_eq!(zoom.scale(), 5.0);
    zoom.set_scale(0.1, 1.0, 5.0, IMAGE);
    assert_eq!(zoom.scale(), 1.0);
}

#[test]
fn test_shrinking_scale_reclamps_pan() {
    let mut zoom = ZoomState::default();
    zoom.set_scale(3.0, 1.0, 5.0, IMAGE);
    zoom.pan_to(Point::new(350.0, 250.0), IMAGE);
    assert_eq!(zoom.pan(), Point::new(350.0, 250.0));

    zoom.set_scale(2.0, 1.0, 5.0, IMAGE);
    assert_eq!(zoom.pan(), Point::new(200.0, 150.0));
}

#[test]
fn test_pan_at_natural_size_stays_centred() {
    let mut zoom = ZoomState::default();
    zoom.pan_to(Point::new(40.0, 40.0), IMAGE);
    assert_eq!(zoom.pan(), Point::default());
}

// ---------------------------------------------------------------------------
// Double-tap toggle
// ---------------------------------------------------------------------------

#[test]
fn test_toggle_from_natural_size_magnifies() {
    let mut zoom = ZoomState::default();
    zoom.toggle(2.0);
    assert_eq!(zoom.scale(), 2.0);
    assert!(zoom.is_zoomed());
    assert_eq!(zoom.pan(), Point::default());
}

#[test]
fn test_toggle_back_recentres() {
    let mut zoom = ZoomState::default();
    zoom.set_scale(4.0, 1.0, 5.0, IMAGE);
    zoom.pan_to(Point::new(100.0, 50.0), IMAGE);
    zoom.toggle(2.0);
    assert_eq!(zoom.scale(), 1.0);
    assert_eq!(zoom.pan(), Point::default());
    assert!(!zoom.is_zoomed());
}

#[test]
fn test_reset() {
    let mut zoom = ZoomState::default();
    zoom.set_scale(3.0, 1.0, 5.0, IMAGE);
    zoom.pan_to(Point::new(-80.0, 20.0), IMAGE);
    zoom.reset();
    assert_eq!(zoom.scale(), 1.0);
    assert_eq!(zoom.pan(), Point::default());
}
