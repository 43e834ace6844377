use photo_layout::*;

fn images(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("photo{}.jpg", i)).collect()
}

fn slot_images(sheet: &Sheet) -> Vec<Option<&str>> {
    sheet
        .photos
        .iter()
        .map(|p| p.image_source.as_deref())
        .collect()
}

#[test]
fn test_paginates_on_image_load() {
    let mut session = EditorSession::new();
    session.add_images(images(2)).unwrap();
    session.set_copies(3).unwrap();

    let sheets = session.sheets();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].photos.len(), session.template().len());
    assert_eq!(sheets[0].filled(), 6);

    let images = slot_images(&sheets[0]);
    assert_eq!(
        &images[..6],
        &[
            Some("photo0.jpg"),
            Some("photo0.jpg"),
            Some("photo0.jpg"),
            Some("photo1.jpg"),
            Some("photo1.jpg"),
            Some("photo1.jpg"),
        ]
    );
    assert!(images[6..].iter().all(Option::is_none));
}

#[test]
fn test_swap_survives_until_sizing_changes() {
    let mut session = EditorSession::new();
    session.add_images(images(2)).unwrap();

    assert!(session.swap_slots(0, 1));
    assert_eq!(
        slot_images(&session.sheets()[0])[..2],
        [Some("photo1.jpg"), Some("photo0.jpg")]
    );

    // Selecting and changing the display unit keep placements
    session.set_unit(PhysicalUnit::Inch);
    assert_eq!(
        slot_images(&session.sheets()[0])[..2],
        [Some("photo1.jpg"), Some("photo0.jpg")]
    );

    // Changing the photo width rebuilds the layout
    session
        .set_photo_size(PhotoSize {
            width_mm: 40.0,
            height_mm: 45.0,
        })
        .unwrap();
    assert_eq!(
        slot_images(&session.sheets()[0])[..2],
        [Some("photo0.jpg"), Some("photo1.jpg")]
    );
}

#[test]
fn test_set_unit_does_not_touch_geometry() {
    let mut session = EditorSession::new();
    session.add_images(images(1)).unwrap();
    let template = session.template().clone();

    session.set_unit(PhysicalUnit::Inch);
    assert_eq!(session.template(), &template);
    assert_eq!(session.state().photo_size, PhotoSize::default());
}

#[test]
fn test_photo_size_in_display_unit() {
    let mut session = EditorSession::new();
    session.set_photo_size_in_unit(4.0, 5.0).unwrap();
    assert!((session.state().photo_size.width_mm - 40.0).abs() < 1e-4);

    session.set_unit(PhysicalUnit::Inch);
    session.set_photo_size_in_unit(2.0, 2.0).unwrap();
    assert!((session.state().photo_size.width_mm - 50.8).abs() < 1e-4);
}

#[test]
fn test_oversized_photo_gives_empty_template() {
    let mut session = EditorSession::new();
    session.add_images(images(3)).unwrap();
    session
        .set_photo_size(PhotoSize {
            width_mm: 250.0,
            height_mm: 45.0,
        })
        .unwrap();

    assert!(session.template().is_empty());
    assert!(session.sheets().is_empty());
    assert!(!session.statistics().unwrap().generatable);
}

#[test]
fn test_place_image_on_current_sheet() {
    let mut session = EditorSession::new();
    session.add_images(images(1)).unwrap();
    assert!(session.place_image(5, Some("extra.jpg".to_string())));
    assert_eq!(
        session.sheets()[0].photos[5].image_source.as_deref(),
        Some("extra.jpg")
    );
    assert!(!session.place_image(999, None));
}

#[test]
fn test_snapshot_restore_keeps_swaps() {
    let mut session = EditorSession::new();
    session.add_images(images(3)).unwrap();
    session.swap_slots(0, 2);
    session
        .load_collage(&images(3), CollageLayoutType::Mosaic)
        .unwrap();
    session.rotate("photo-1").unwrap();

    let snapshot = session.snapshot();
    let restored = EditorSession::from_state(snapshot.clone()).unwrap();

    assert_eq!(restored.snapshot(), snapshot);
    assert_eq!(restored.template(), session.template());
    assert_eq!(restored.collage_photos(), session.collage_photos());
}

#[test]
fn test_restore_repaginates_stale_sheets() {
    let mut session = EditorSession::new();
    session.add_images(images(2)).unwrap();
    let mut snapshot = session.snapshot();

    // Saved sheets from a different photo size
    snapshot.photo_size = PhotoSize {
        width_mm: 50.0,
        height_mm: 50.0,
    };

    let restored = EditorSession::from_state(snapshot).unwrap();
    let expected = paginate(
        &restored.state().images,
        restored.state().copies,
        restored.template(),
    );
    assert_eq!(restored.sheets(), expected.as_slice());
}

#[test]
fn test_restore_rejects_invalid_state() {
    let mut state = EditorState::default();
    state.copies = 0;
    assert!(EditorSession::from_state(state).is_err());
}

#[test]
fn test_freeform_photo_drag_commits() {
    let mut session = EditorSession::new();
    session
        .load_collage(&images(2), CollageLayoutType::Freeform)
        .unwrap();
    let start = session.collage_photos()[0].clone();

    session
        .begin_drag(
            DragTarget::Photo(start.id.clone()),
            (0.0, 0.0),
            (200.0, 200.0),
        )
        .unwrap();
    session.update_drag((20.0, 10.0));
    assert!(session.end_drag());

    let moved = &session.collage_photos()[0];
    assert!((moved.x - (start.x + 10.0)).abs() < 1e-4);
    assert!((moved.y - (start.y + 5.0)).abs() < 1e-4);
    assert!(!session.is_dragging());
}

#[test]
fn test_zorder_through_session() {
    let mut session = EditorSession::new();
    session
        .load_collage(&images(3), CollageLayoutType::Freeform)
        .unwrap();

    assert!(session.bring_forward("photo-0").unwrap());
    assert!(!session.send_backward("photo-1").unwrap());

    let z = |id: &str| {
        session
            .collage_photos()
            .iter()
            .find(|p| p.id == id)
            .unwrap()
            .z_index
    };
    assert!(z("photo-0") > z("photo-1"));
    assert!(z("photo-0") < z("photo-2"));
}
