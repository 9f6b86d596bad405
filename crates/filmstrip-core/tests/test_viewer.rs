use filmstrip_core::gesture::GesturePhase;
use filmstrip_core::layout::{Layout, Mount, Point};
use filmstrip_core::viewer::{
    ImageHandle, ImageSource, Tunables, Viewer, ViewerOptions,
};

fn uris(count: usize) -> Vec<ImageSource> {
    (0..count)
        .map(|i| ImageSource::Uri(format!("img/{i:02}.png")))
        .collect()
}

fn viewer(width: f32, height: f32) -> Viewer {
    Viewer::new(ViewerOptions::default(), Mount::new(width, height)).unwrap()
}

fn lazy_viewer(width: f32, height: f32) -> Viewer {
    let options = ViewerOptions {
        lazy: true,
        ..ViewerOptions::default()
    };
    Viewer::new(options, Mount::new(width, height)).unwrap()
}

fn settle(viewer: &mut Viewer) {
    for _ in 0..200 {
        if !viewer.tick_frame() {
            return;
        }
    }
    panic!("scroll animation failed to settle");
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_counter_before_any_list() {
    let viewer = viewer(500.0, 400.0);
    assert_eq!(viewer.counter(), "1/0");
    assert_eq!(viewer.len(), 0);
    assert!(viewer.is_empty());
    assert_eq!(viewer.current_index(), 0);
}

#[test]
fn test_mount_must_have_area() {
    assert!(Viewer::new(ViewerOptions::default(), Mount::new(0.0, 400.0)).is_err());
    assert!(Viewer::new(ViewerOptions::default(), Mount::new(500.0, -10.0)).is_err());
    assert!(Viewer::new(ViewerOptions::default(), Mount::new(f32::NAN, 400.0)).is_err());
    assert!(Viewer::new(ViewerOptions::default(), Mount::new(500.0, f32::INFINITY)).is_err());

    let err = Viewer::new(ViewerOptions::default(), Mount::new(0.0, 400.0)).unwrap_err();
    let s = format!("{err}");
    assert!(s.contains("usable area"), "got: {s}");
}

#[test]
fn test_preview_bar_presence_rules() {
    assert!(viewer(601.0, 400.0).preview_bar().is_some());
    assert!(viewer(600.0, 400.0).preview_bar().is_none());
    assert!(lazy_viewer(800.0, 600.0).preview_bar().is_none());
}

// ---------------------------------------------------------------------------
// Image lists and deferred loading
// ---------------------------------------------------------------------------

#[test]
fn test_set_image_list_refreshes_counter() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(3));
    assert_eq!(viewer.counter(), "1/3");
    assert_eq!(viewer.len(), 3);
    assert_eq!(viewer.strip_offset(), 0.0);
    assert!(viewer.items().iter().all(|item| item.is_resolved()));
}

#[test]
fn test_lazy_defers_all_but_the_first() {
    let mut viewer = lazy_viewer(800.0, 600.0);
    viewer.set_image_list(uris(3));
    assert!(viewer.item(0).unwrap().is_resolved());
    assert!(!viewer.item(1).unwrap().is_resolved());
    assert!(viewer.item(1).unwrap().display_source().is_none());

    viewer.set_current_index(2);
    assert_eq!(viewer.counter(), "3/3");
    assert!(viewer.item(2).unwrap().is_resolved());
    assert_eq!(
        viewer.item(2).unwrap().display_source(),
        Some(&ImageSource::Uri(String::from("img/02.png")))
    );
    // Skipped over, never shown, still deferred.
    assert!(!viewer.item(1).unwrap().is_resolved());

    // Resolution is one-way; leaving and returning re-fetches nothing.
    viewer.set_current_index(0);
    viewer.set_current_index(2);
    assert!(viewer.item(2).unwrap().is_resolved());
}

#[test]
fn test_handles_are_never_deferred() {
    let mut viewer = lazy_viewer(800.0, 600.0);
    viewer.set_image_list(vec![
        ImageSource::Uri(String::from("a.png")),
        ImageSource::Handle(ImageHandle(7)),
        ImageSource::Uri(String::from("b.png")),
    ]);
    assert!(viewer.item(1).unwrap().is_resolved());
    assert_eq!(
        viewer.item(1).unwrap().display_source(),
        Some(&ImageSource::Handle(ImageHandle(7)))
    );
    assert!(!viewer.item(2).unwrap().is_resolved());
}

#[test]
fn test_shorter_list_leaves_the_index_to_the_caller() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(5));
    viewer.set_current_index(4);
    settle(&mut viewer);
    assert_eq!(viewer.strip_offset(), 2000.0);

    viewer.set_image_list(uris(3));
    assert_eq!(viewer.current_index(), 4);
    assert_eq!(viewer.counter(), "5/3");
    assert_eq!(viewer.strip_offset(), 0.0);

    // The next index change lands back inside the list.
    viewer.set_current_index(4);
    assert_eq!(viewer.current_index(), 2);
    assert_eq!(viewer.counter(), "3/3");
}

#[test]
fn test_replacing_with_an_empty_list() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(3));
    viewer.set_image_list(Vec::new());
    assert_eq!(viewer.len(), 0);
    assert_eq!(viewer.counter(), "1/0");
    assert_eq!(viewer.strip_offset(), 0.0);
}

// ---------------------------------------------------------------------------
// Index changes
// ---------------------------------------------------------------------------

#[test]
fn test_set_current_index_moves_the_strip() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(5));
    viewer.set_current_index(3);
    assert_eq!(viewer.strip_destination(), Some(1500.0));
    assert_eq!(viewer.counter(), "4/5");
    settle(&mut viewer);
    assert_eq!(viewer.strip_offset(), 1500.0);
}

#[test]
fn test_out_of_range_index_lands_on_the_last_image() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(3));
    viewer.set_current_index(99);
    assert_eq!(viewer.current_index(), 2);
    assert_eq!(viewer.counter(), "3/3");
}

#[test]
fn test_index_change_on_an_empty_list_is_ignored() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_current_index(5);
    assert_eq!(viewer.current_index(), 0);
    assert_eq!(viewer.counter(), "1/0");
}

#[test]
fn test_index_change_resets_zoom_but_reassert_keeps_it() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(2));
    viewer.double_tap();
    assert_eq!(viewer.zoom_scale(), 2.0);

    viewer.set_current_index(1);
    assert_eq!(viewer.zoom_scale(), 1.0);
    assert_eq!(viewer.pan_offset(), Point::default());

    viewer.double_tap();
    viewer.set_current_index(1);
    assert_eq!(viewer.zoom_scale(), 2.0);
}

#[test]
fn test_set_layout_rescales_the_slots() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(3));
    viewer.set_layout(Layout::for_mount(&Mount::new(350.0, 400.0)));
    viewer.set_current_index(2);
    assert_eq!(viewer.strip_destination(), Some(700.0));
}

// ---------------------------------------------------------------------------
// Wheel
// ---------------------------------------------------------------------------

#[test]
fn test_wheel_steps_and_is_silent_at_the_ends() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(2));
    viewer.wheel(5.0);
    assert_eq!(viewer.current_index(), 1);
    viewer.wheel(3.0);
    assert_eq!(viewer.current_index(), 1);
    viewer.wheel(-2.0);
    assert_eq!(viewer.current_index(), 0);
    viewer.wheel(-1.0);
    assert_eq!(viewer.current_index(), 0);
}

#[test]
fn test_wheel_on_an_empty_list() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.wheel(1.0);
    assert_eq!(viewer.current_index(), 0);
    assert_eq!(viewer.counter(), "1/0");
}

// ---------------------------------------------------------------------------
// Swipes
// ---------------------------------------------------------------------------

#[test]
fn test_swipe_past_the_threshold_advances() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(3));
    viewer.touch_start(&[Point::new(100.0, 200.0)]);
    viewer.touch_move(&[Point::new(40.0, 200.0)]);
    assert_eq!(viewer.gesture_phase(), GesturePhase::Panning);
    assert_eq!(viewer.strip_offset(), 60.0);

    viewer.touch_end();
    assert_eq!(viewer.current_index(), 1);
    assert_eq!(viewer.counter(), "2/3");
    assert_eq!(viewer.strip_destination(), Some(500.0));
    settle(&mut viewer);
    assert_eq!(viewer.strip_offset(), 500.0);
}

#[test]
fn test_swipe_at_the_end_is_dropped() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(2));
    viewer.set_current_index(1);
    settle(&mut viewer);
    assert_eq!(viewer.strip_offset(), 500.0);

    viewer.touch_start(&[Point::new(300.0, 100.0)]);
    viewer.touch_move(&[Point::new(200.0, 100.0)]);
    // The drag itself cannot pull past the last slot.
    assert_eq!(viewer.strip_offset(), 500.0);
    viewer.touch_end();
    assert_eq!(viewer.current_index(), 1);
    assert_eq!(viewer.counter(), "2/2");
    assert_eq!(viewer.strip_destination(), None);
    assert_eq!(viewer.gesture_phase(), GesturePhase::Idle);
}

#[test]
fn test_short_drag_snaps_back() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(3));
    viewer.touch_start(&[Point::new(100.0, 100.0)]);
    viewer.touch_move(&[Point::new(70.0, 100.0)]);
    assert_eq!(viewer.strip_offset(), 30.0);

    viewer.touch_end();
    assert_eq!(viewer.current_index(), 0);
    assert_eq!(viewer.strip_destination(), Some(0.0));
    settle(&mut viewer);
    assert_eq!(viewer.strip_offset(), 0.0);
}

#[test]
fn test_custom_swipe_threshold() {
    let options = ViewerOptions {
        tunables: Tunables {
            swipe_threshold: 20.0,
            ..Tunables::default()
        },
        ..ViewerOptions::default()
    };
    let mut viewer = Viewer::new(options, Mount::new(500.0, 400.0)).unwrap();
    viewer.set_image_list(uris(2));
    viewer.touch_start(&[Point::new(100.0, 100.0)]);
    viewer.touch_move(&[Point::new(70.0, 100.0)]);
    viewer.touch_end();
    assert_eq!(viewer.current_index(), 1);
}

// ---------------------------------------------------------------------------
// Pinch and pan
// ---------------------------------------------------------------------------

#[test]
fn test_pinch_scales_and_clamps() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(1));
    viewer.touch_start(&[Point::new(200.0, 200.0), Point::new(250.0, 200.0)]);
    assert_eq!(viewer.gesture_phase(), GesturePhase::Pinching);

    viewer.touch_move(&[Point::new(150.0, 200.0), Point::new(350.0, 200.0)]);
    assert_eq!(viewer.zoom_scale(), 4.0);
    assert_eq!(viewer.pan_offset(), Point::new(-50.0, 0.0));

    viewer.touch_move(&[Point::new(100.0, 200.0), Point::new(400.0, 200.0)]);
    assert_eq!(viewer.zoom_scale(), 5.0);
    assert_eq!(viewer.pan_offset(), Point::new(-100.0, 0.0));
}

#[test]
fn test_pinch_never_shrinks_below_natural_size() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(1));
    viewer.touch_start(&[Point::new(200.0, 200.0), Point::new(300.0, 200.0)]);
    viewer.touch_move(&[Point::new(225.0, 200.0), Point::new(275.0, 200.0)]);
    assert_eq!(viewer.zoom_scale(), 1.0);
    assert_eq!(viewer.pan_offset(), Point::default());
}

#[test]
fn test_drag_pans_a_magnified_image() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(1));
    viewer.double_tap();
    assert_eq!(viewer.zoom_scale(), 2.0);

    viewer.touch_start(&[Point::new(100.0, 100.0)]);
    viewer.touch_move(&[Point::new(400.0, 50.0)]);
    assert_eq!(viewer.pan_offset(), Point::new(250.0, -50.0));
    assert_eq!(viewer.strip_offset(), 0.0);

    // Ending the pan re-asserts the index without losing the zoom.
    viewer.touch_end();
    assert_eq!(viewer.zoom_scale(), 2.0);
    assert_eq!(viewer.pan_offset(), Point::new(250.0, -50.0));
}

#[test]
fn test_double_tap_toggles() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(1));
    viewer.double_tap();
    assert_eq!(viewer.zoom_scale(), 2.0);
    viewer.double_tap();
    assert_eq!(viewer.zoom_scale(), 1.0);
}

#[test]
fn test_double_tap_on_an_empty_list() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.double_tap();
    assert_eq!(viewer.zoom_scale(), 1.0);
}

#[test]
fn test_pinch_start_reasserts_the_index_mid_drag() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(3));
    viewer.set_current_index(1);
    settle(&mut viewer);

    viewer.touch_start(&[Point::new(400.0, 100.0)]);
    viewer.touch_move(&[Point::new(300.0, 100.0)]);
    assert_eq!(viewer.strip_offset(), 600.0);

    // Second finger lands: the strip recentres and the pending swipe dies.
    viewer.touch_start(&[Point::new(300.0, 100.0), Point::new(350.0, 100.0)]);
    assert_eq!(viewer.gesture_phase(), GesturePhase::Pinching);
    assert_eq!(viewer.strip_destination(), Some(500.0));
    settle(&mut viewer);

    viewer.touch_end();
    assert_eq!(viewer.current_index(), 1);
}

#[test]
fn test_touch_on_an_empty_list() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.touch_start(&[Point::new(10.0, 10.0), Point::new(20.0, 10.0)]);
    viewer.touch_move(&[Point::new(15.0, 10.0), Point::new(25.0, 10.0)]);
    viewer.touch_end();
    assert_eq!(viewer.current_index(), 0);
    assert_eq!(viewer.counter(), "1/0");
    assert_eq!(viewer.strip_offset(), 0.0);
}

// ---------------------------------------------------------------------------
// Preview bar
// ---------------------------------------------------------------------------

#[test]
fn test_preview_bar_centres_the_highlighted_tile() {
    let mut viewer = viewer(800.0, 600.0);
    viewer.set_image_list(uris(20));
    assert_eq!(viewer.preview_bar().unwrap().highlight(), None);

    viewer.set_current_index(10);
    assert_eq!(viewer.preview_bar().unwrap().highlight(), Some(10));
    assert_eq!(viewer.preview_bar().unwrap().destination(), Some(345.0));
    assert_eq!(viewer.strip_destination(), Some(8000.0));
    settle(&mut viewer);
    assert_eq!(viewer.preview_bar().unwrap().offset(), 345.0);
    assert_eq!(viewer.strip_offset(), 8000.0);
}

#[test]
fn test_preview_bar_stops_at_its_ends() {
    let mut viewer = viewer(800.0, 600.0);
    viewer.set_image_list(uris(20));
    viewer.set_current_index(19);
    assert_eq!(viewer.preview_bar().unwrap().destination(), Some(643.0));
    viewer.set_current_index(0);
    assert_eq!(viewer.preview_bar().unwrap().destination(), Some(0.0));
}

#[test]
fn test_preview_bar_with_few_tiles_never_scrolls() {
    // Three tiles span 2 * 47 + 50 = 144 units, less than the bar shows.
    let mut viewer = viewer(800.0, 600.0);
    viewer.set_image_list(uris(3));
    viewer.set_current_index(2);
    assert_eq!(viewer.preview_bar().unwrap().destination(), Some(0.0));
    settle(&mut viewer);
    assert_eq!(viewer.preview_bar().unwrap().offset(), 0.0);
}

#[test]
fn test_reasserting_the_index_changes_nothing() {
    let mut viewer = viewer(800.0, 600.0);
    viewer.set_image_list(uris(20));
    viewer.set_current_index(7);
    let counter = viewer.counter().to_string();
    let highlight = viewer.preview_bar().unwrap().highlight();
    let strip_destination = viewer.strip_destination();
    let preview_destination = viewer.preview_bar().unwrap().destination();

    viewer.set_current_index(7);
    assert_eq!(viewer.counter(), counter);
    assert_eq!(viewer.preview_bar().unwrap().highlight(), highlight);
    assert_eq!(viewer.strip_destination(), strip_destination);
    assert_eq!(viewer.preview_bar().unwrap().destination(), preview_destination);
}

#[test]
fn test_thumb_click_is_an_index_change() {
    let mut viewer = viewer(800.0, 600.0);
    viewer.set_image_list(uris(20));
    viewer.thumb_click(5);
    assert_eq!(viewer.current_index(), 5);
    assert_eq!(viewer.counter(), "6/20");
    assert_eq!(viewer.preview_bar().unwrap().highlight(), Some(5));
}

// ---------------------------------------------------------------------------
// Frame ticking and teardown
// ---------------------------------------------------------------------------

#[test]
fn test_tick_frame_reports_running_animations() {
    let mut viewer = viewer(500.0, 400.0);
    viewer.set_image_list(uris(3));
    assert!(!viewer.is_animating());
    viewer.set_current_index(2);
    assert!(viewer.is_animating());
    assert!(viewer.tick_frame());
    settle(&mut viewer);
    assert!(!viewer.is_animating());
    assert_eq!(viewer.strip_offset(), 1000.0);
}

#[test]
fn test_destroy_clears_everything_but_the_index() {
    let mut viewer = viewer(800.0, 600.0);
    viewer.set_image_list(uris(5));
    viewer.set_current_index(3);
    settle(&mut viewer);
    viewer.double_tap();

    viewer.destroy();
    assert!(viewer.is_empty());
    assert_eq!(viewer.counter(), "");
    assert_eq!(viewer.zoom_scale(), 1.0);
    assert_eq!(viewer.strip_offset(), 0.0);
    assert_eq!(viewer.preview_bar().unwrap().offset(), 0.0);
    assert_eq!(viewer.preview_bar().unwrap().highlight(), None);
    assert_eq!(viewer.gesture_phase(), GesturePhase::Idle);
    assert_eq!(viewer.current_index(), 3);

    // Destroying twice is allowed, and navigating afterwards is a no-op.
    viewer.destroy();
    viewer.set_current_index(1);
    assert_eq!(viewer.current_index(), 3);

    // A fresh list resumes from the surviving index.
    viewer.set_image_list(uris(5));
    assert_eq!(viewer.counter(), "4/5");
}
