use std::path::Path;

use image::{Rgba, RgbaImage};
use roiselect::annotator::store::ANNOTATIONS_FILE;
use roiselect::annotator::{AnnotationList, AnnotatorSession, PixelRect};
use roiselect::config::RoiSelectConfig;
use roiselect::domain::Size;
use roiselect::session::{Key, PointerEvent, RoiEvent};

const VIEWPORT: Size = Size {
    width: 400,
    height: 400,
};

/// a.png is 200x100 (scale 2, image rows 100..300), b.png is 100x100
fn folder() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(200, 100, Rgba([10, 20, 30, 255]))
        .save(dir.path().join("a.png"))
        .unwrap();
    RgbaImage::from_pixel(100, 100, Rgba([200, 0, 0, 255]))
        .save(dir.path().join("b.png"))
        .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
    dir
}

fn open(dir: &Path) -> AnnotatorSession {
    AnnotatorSession::open(dir, RoiSelectConfig::default(), VIEWPORT).unwrap()
}

fn drag(session: &mut AnnotatorSession, from: (f32, f32), to: (f32, f32)) -> Vec<RoiEvent> {
    let mut events = session.handle_pointer(PointerEvent::press(from.0, from.1));
    events.extend(session.handle_pointer(PointerEvent::drag_to(to.0, to.1)));
    events.extend(session.handle_pointer(PointerEvent::release(to.0, to.1)));
    events
}

#[test]
fn opens_first_image_in_create_mode() {
    let dir = folder();
    let session = open(dir.path());
    assert_eq!(session.files(), ["a.png".to_string(), "b.png".to_string()]);
    assert_eq!(session.current_file(), Some("a.png"));
    assert_eq!(session.editor().state().creating_type(), Some("Default"));
    assert_eq!(session.annotations().len(), 2);
}

#[test]
fn drawn_rectangles_survive_reopen() {
    let dir = folder();
    let mut session = open(dir.path());

    let events = drag(&mut session, (20.0, 120.0), (120.0, 170.0));
    assert!(matches!(&events[..], [RoiEvent::Created(_)]));
    // The host keeps drawing
    assert_eq!(session.editor().state().creating_type(), Some("Default"));
    assert_eq!(
        session.annotations().check_out("a.png"),
        vec![PixelRect::new(10, 10, 50, 25)]
    );

    assert!(session.next().unwrap());
    assert!(!session.next().unwrap());
    assert!(session.editor().is_empty());
    session.save().unwrap();
    assert!(dir.path().join(ANNOTATIONS_FILE).exists());

    let mut reopened = open(dir.path());
    assert_eq!(reopened.editor().len(), 1);
    let snap = reopened.editor().roi(0).unwrap();
    assert_eq!(PixelRect::round(snap.original_rect), PixelRect::new(10, 10, 50, 25));

    // Saving again without edits changes nothing
    reopened.save().unwrap();
    let list = AnnotationList::load(&dir.path().join(ANNOTATIONS_FILE)).unwrap();
    assert_eq!(list.check_out("a.png"), vec![PixelRect::new(10, 10, 50, 25)]);
    assert!(list.check_out("b.png").is_empty());
}

#[test]
fn delete_is_persisted() {
    let dir = folder();
    let mut session = open(dir.path());
    drag(&mut session, (20.0, 120.0), (120.0, 170.0));

    session.editor_mut().cancel_creating();
    session.handle_pointer(PointerEvent::press(70.0, 145.0));
    session.handle_pointer(PointerEvent::release(70.0, 145.0));
    let events = session.handle_key(&Key::Delete);
    assert!(matches!(&events[..], [RoiEvent::Deleted(_)]));
    assert!(session.annotations().check_out("a.png").is_empty());
}

#[test]
fn export_and_crops() {
    let dir = folder();
    let mut session = open(dir.path());
    drag(&mut session, (20.0, 120.0), (120.0, 170.0));
    drag(&mut session, (200.0, 200.0), (300.0, 300.0));

    let out = dir.path().join("export.txt");
    session.export(&out).unwrap();
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "a.png\n2\n10 10 50 25\n100 50 50 50\nb.png\n0\n"
    );

    let crops_dir = dir.path().join("crops");
    let paths = session.save_current_crops(&crops_dir).unwrap();
    assert_eq!(paths.len(), 2);
    assert!(crops_dir.join("a_ROI_1.png").exists());
    let crop = image::open(crops_dir.join("a_ROI_2.png")).unwrap().to_rgba8();
    assert_eq!(crop.dimensions(), (50, 50));
    assert_eq!(crop.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
}

#[test]
fn close_remembers_folder() {
    let dir = folder();
    let session = open(dir.path());
    let config = session.close().unwrap();
    assert_eq!(config.last_folder.as_deref(), Some(dir.path()));
}
