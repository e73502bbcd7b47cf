use image::RgbaImage;
use roiselect::capture::image::SourceImage;
use roiselect::config::RoiColor;
use roiselect::domain::{CursorIcon, Point, RectF, Size};
use roiselect::error::RoiError;
use roiselect::session::{EditorOptions, InteractionState, Key, PointerEvent, RoiEditor, RoiEvent};

/// 1000x500 image in a 400x400 viewport: scale 0.4, image rows 100..300
fn editor() -> RoiEditor {
    let mut editor = RoiEditor::new(EditorOptions::default());
    editor.set_viewport_size(Size::new(400, 400));
    editor.set_source_image(Some(SourceImage::new(RgbaImage::new(1000, 500))));
    editor.register_type("part", RoiColor::default(), "").unwrap();
    editor.drain_events();
    editor
}

fn drag(editor: &mut RoiEditor, from: (f32, f32), to: (f32, f32)) {
    editor.handle_pointer(PointerEvent::press(from.0, from.1));
    editor.handle_pointer(PointerEvent::drag_to(to.0, to.1));
    editor.handle_pointer(PointerEvent::release(to.0, to.1));
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn fit_matches_letterbox_example() {
    let editor = editor();
    let t = editor.transform();
    assert!(approx(t.scale(), 0.4));
    assert_eq!(t.scaled_image_size(), Size::new(400, 200));
    assert!(approx(t.offset_x(), 0.0));
    assert!(approx(t.offset_y(), 100.0));

    let p = Point::new(123.5, 456.25);
    let back = t.point_to_original(t.point_to_display(p));
    assert!(approx(back.x, p.x) && approx(back.y, p.y));
}

#[test]
fn drawing_creates_one_roi_in_original_space() {
    let mut editor = editor();
    editor.start_creating("part").unwrap();
    assert_eq!(editor.cursor(), CursorIcon::Crosshair);

    // Dragged right-to-left and bottom-to-top
    drag(&mut editor, (200.0, 250.0), (100.0, 150.0));

    let events = editor.drain_events();
    assert_eq!(events.len(), 1);
    let RoiEvent::Created(snap) = &events[0] else {
        panic!("expected Created, got {:?}", events[0]);
    };
    let expected = editor
        .transform()
        .rect_to_original(RectF::from_corners(Point::new(200.0, 250.0), Point::new(100.0, 150.0)));
    assert!(approx(snap.original_rect.x, expected.x));
    assert!(approx(snap.original_rect.y, expected.y));
    assert!(approx(snap.original_rect.width, 250.0));
    assert!(approx(snap.original_rect.height, 250.0));
    assert_eq!(editor.types().get("part").unwrap().current_count, 1);
    assert!(editor.state().is_idle());
}

#[test]
fn small_draw_is_discarded() {
    let mut editor = editor();
    editor.start_creating("part").unwrap();
    drag(&mut editor, (100.0, 150.0), (105.0, 200.0));
    assert!(editor.drain_events().is_empty());
    assert!(editor.is_empty());
    assert_eq!(editor.types().get("part").unwrap().current_count, 0);
}

#[test]
fn auto_continue_stays_in_create_mode() {
    let mut editor = RoiEditor::new(EditorOptions {
        auto_continue: true,
        ..Default::default()
    });
    editor.set_viewport_size(Size::new(400, 400));
    editor.register_type("part", RoiColor::default(), "").unwrap();
    editor.start_creating("part").unwrap();

    drag(&mut editor, (10.0, 10.0), (60.0, 60.0));
    assert_eq!(editor.state().creating_type(), Some("part"));
    drag(&mut editor, (100.0, 100.0), (160.0, 160.0));
    assert_eq!(editor.len(), 2);
}

#[test]
fn eviction_removes_oldest_before_create() {
    let mut editor = editor();
    editor.set_max_count("part", Some(2)).unwrap();
    for (i, x) in [0.0, 100.0].into_iter().enumerate() {
        editor.add_roi("part", RectF::new(x, 0.0, 50.0, 50.0)).unwrap();
        assert_eq!(editor.len(), i + 1);
    }
    // At capacity: programmatic add is refused without eviction
    assert_eq!(editor.add_roi("part", RectF::new(0.0, 0.0, 5.0, 5.0)), Ok(None));
    editor.drain_events();

    editor.start_creating("part").unwrap();
    drag(&mut editor, (200.0, 150.0), (300.0, 250.0));

    let events = editor.drain_events();
    assert_eq!(events.len(), 2);
    match (&events[0], &events[1]) {
        (RoiEvent::Deleted(gone), RoiEvent::Created(made)) => {
            assert_eq!(gone.index, 0);
            assert!(approx(gone.original_rect.x, 0.0));
            assert_eq!(made.index, 1);
        }
        other => panic!("unexpected events {other:?}"),
    }
    assert_eq!(editor.len(), 2);
    assert_eq!(editor.types().get("part").unwrap().current_count, 2);
    assert!(approx(editor.roi(0).unwrap().original_rect.x, 100.0));
}

#[test]
fn zero_capacity_never_holds_rois() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(0.0, 0.0, 50.0, 50.0)).unwrap();
    editor.set_max_count("part", Some(0)).unwrap();
    editor.start_creating("part").unwrap();
    assert!(editor.is_empty());

    drag(&mut editor, (100.0, 150.0), (200.0, 250.0));
    assert!(editor.is_empty());
    assert!(
        !editor
            .drain_events()
            .iter()
            .any(|e| matches!(e, RoiEvent::Created(_)))
    );
}

#[test]
fn single_selection_after_each_press() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(0.0, 0.0, 200.0, 200.0)).unwrap();
    editor.add_roi("part", RectF::new(500.0, 0.0, 200.0, 200.0)).unwrap();
    // Display: (0,100)-(80,180) and (200,100)-(280,180)

    for (x, y, expected) in [
        (40.0, 140.0, Some(0)),
        (240.0, 140.0, Some(1)),
        (150.0, 140.0, None),
        (40.0, 140.0, Some(0)),
    ] {
        editor.handle_pointer(PointerEvent::press(x, y));
        editor.handle_pointer(PointerEvent::release(x, y));
        assert_eq!(editor.selected_index(), expected);
        let flagged = editor.rois().iter().filter(|r| r.selected).count();
        assert_eq!(flagged, usize::from(expected.is_some()));
    }
}

#[test]
fn press_selects_topmost_and_fires_selected() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(0.0, 0.0, 200.0, 200.0)).unwrap();
    editor.add_roi("part", RectF::new(50.0, 50.0, 200.0, 200.0)).unwrap();
    editor.drain_events();

    editor.handle_pointer(PointerEvent::press(50.0, 150.0));
    let events = editor.drain_events();
    assert!(matches!(&events[..], [RoiEvent::Selected(s)] if s.index == 1));
    assert!(matches!(editor.state(), InteractionState::Dragging { .. }));
}

#[test]
fn drag_is_clamped_to_image() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(100.0, 100.0, 200.0, 200.0)).unwrap();
    // Display (40,140)-(120,220)
    editor.handle_pointer(PointerEvent::press(80.0, 180.0));
    editor.handle_pointer(PointerEvent::drag_to(80.0, 20.0));
    editor.handle_pointer(PointerEvent::release(80.0, 20.0));

    let snap = editor.roi(0).unwrap();
    assert!(approx(snap.display_rect.y, 100.0));
    assert!(approx(snap.original_rect.y, 0.0));
    let events = editor.drain_events();
    assert!(matches!(events.last(), Some(RoiEvent::Modified(_))));
}

#[test]
fn resize_pins_far_edge_on_image_boundary() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(800.0, 100.0, 100.0, 100.0)).unwrap();
    // Display (320,140)-(360,180); grab the right edge midpoint
    editor.handle_pointer(PointerEvent::press(360.0, 160.0));
    assert!(matches!(editor.state(), InteractionState::Resizing { .. }));
    editor.handle_pointer(PointerEvent::drag_to(500.0, 160.0));
    editor.handle_pointer(PointerEvent::release(500.0, 160.0));

    let snap = editor.roi(0).unwrap();
    assert!(approx(snap.display_rect.x + snap.display_rect.width, 400.0));
    assert!(approx(snap.original_rect.x + snap.original_rect.width, 1000.0));
}

#[test]
fn drag_deltas_follow_previous_sample() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(100.0, 100.0, 200.0, 200.0)).unwrap();
    // Display x 40..120
    editor.handle_pointer(PointerEvent::press(80.0, 180.0));
    editor.handle_pointer(PointerEvent::drag_to(90.0, 180.0));
    editor.handle_pointer(PointerEvent::drag_to(100.0, 180.0));
    editor.handle_pointer(PointerEvent::drag_to(95.0, 180.0));
    editor.handle_pointer(PointerEvent::release(95.0, 180.0));

    // Net movement equals pointer travel, 15 px
    assert!(approx(editor.roi(0).unwrap().display_rect.x, 55.0));
}

#[test]
fn delete_key_removes_selection() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(0.0, 0.0, 200.0, 200.0)).unwrap();
    editor.add_roi("part", RectF::new(500.0, 0.0, 200.0, 200.0)).unwrap();
    assert!(!editor.handle_key(&Key::Delete));

    editor.handle_pointer(PointerEvent::press(240.0, 140.0));
    editor.handle_pointer(PointerEvent::release(240.0, 140.0));
    editor.drain_events();

    assert!(editor.handle_key(&Key::Delete));
    let events = editor.drain_events();
    assert!(matches!(&events[..], [RoiEvent::Deleted(s)] if s.index == 1));
    assert_eq!(editor.len(), 1);
    assert_eq!(editor.selected_index(), None);
    assert_eq!(editor.types().get("part").unwrap().current_count, 1);
}

#[test]
fn escape_cancels_draw_then_selection() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(0.0, 0.0, 200.0, 200.0)).unwrap();
    editor.highlight_roi(0, true);
    editor.start_creating("part").unwrap();
    editor.handle_pointer(PointerEvent::press(200.0, 150.0));
    editor.handle_pointer(PointerEvent::drag_to(300.0, 250.0));

    assert!(editor.handle_key(&Key::Escape));
    assert!(editor.state().is_idle());
    assert_eq!(editor.len(), 1);
    assert_eq!(editor.selected_index(), Some(0));

    assert!(editor.handle_key(&Key::Escape));
    assert_eq!(editor.selected_index(), None);
}

#[test]
fn escape_during_drag_releases_the_rectangle() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(100.0, 100.0, 200.0, 200.0)).unwrap();
    editor.drain_events();
    // Display x 40..120
    editor.handle_pointer(PointerEvent::press(80.0, 180.0));
    assert!(editor.handle_key(&Key::Escape));
    assert!(editor.state().is_idle());
    assert_eq!(editor.selected_index(), None);

    editor.handle_pointer(PointerEvent::drag_to(150.0, 180.0));
    editor.handle_pointer(PointerEvent::release(150.0, 180.0));

    assert!(approx(editor.roi(0).unwrap().display_rect.x, 40.0));
    let events = editor.drain_events();
    assert!(matches!(&events[..], [RoiEvent::Selected(_)]));
}

#[test]
fn escape_during_resize_keeps_extent() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(800.0, 100.0, 100.0, 100.0)).unwrap();
    editor.handle_pointer(PointerEvent::press(360.0, 160.0));
    assert!(matches!(editor.state(), InteractionState::Resizing { .. }));
    editor.handle_key(&Key::Escape);
    editor.handle_pointer(PointerEvent::drag_to(390.0, 160.0));

    assert!(approx(editor.roi(0).unwrap().display_rect.width, 40.0));
}

#[test]
fn out_of_range_indices_are_ignored() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(0.0, 0.0, 50.0, 50.0)).unwrap();
    editor.drain_events();

    assert!(!editor.remove_roi(7));
    assert!(!editor.update_roi(7, RectF::new(0.0, 0.0, 1.0, 1.0)));
    assert!(!editor.highlight_roi(7, true));
    assert!(editor.roi(7).is_none());
    assert_eq!(editor.len(), 1);
    assert!(editor.drain_events().is_empty());
}

#[test]
fn removing_from_empty_editor_is_silent() {
    let mut editor = editor();
    assert!(editor.is_empty());
    assert!(!editor.remove_roi(0));
    assert!(!editor.delete_selected());
    assert!(editor.is_empty());
    assert!(editor.drain_events().is_empty());
}

#[test]
fn huge_roi_is_accepted() {
    let mut editor = editor();
    let index = editor
        .add_roi("part", RectF::new(2.0e9, 0.0, 2.0e9, 10.0))
        .unwrap();
    assert_eq!(index, Some(0));
    let events = editor.drain_events();
    assert!(matches!(&events[..], [RoiEvent::Created(s)] if s.original_pixels.right == i32::MAX));
    assert!(editor.roi_image(0).is_none());
}

#[test]
fn unknown_type_is_reported() {
    let mut editor = editor();
    assert_eq!(
        editor.start_creating("ghost"),
        Err(RoiError::UnknownType("ghost".to_string()))
    );
    assert!(editor.add_roi("ghost", RectF::new(0.0, 0.0, 5.0, 5.0)).is_err());
    assert!(editor.state().is_idle());
}

#[test]
fn hidden_type_cannot_be_hit() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(0.0, 0.0, 200.0, 200.0)).unwrap();
    editor.set_type_visible("part", false).unwrap();
    assert!(!editor.roi(0).unwrap().visible);

    editor.handle_pointer(PointerEvent::press(40.0, 140.0));
    assert_eq!(editor.selected_index(), None);
}

#[test]
fn update_and_remove_emit_events() {
    let mut editor = editor();
    editor.add_roi("part", RectF::new(0.0, 0.0, 50.0, 50.0)).unwrap();
    editor.drain_events();

    assert!(editor.update_roi(0, RectF::new(10.0, 20.0, 30.0, 40.0)));
    assert!(editor.remove_roi(0));
    let events = editor.drain_events();
    assert!(matches!(&events[..], [RoiEvent::Modified(_), RoiEvent::Deleted(_)]));
    assert!(approx(events[0].snapshot().original_rect.y, 20.0));
}
