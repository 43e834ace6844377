use photo_layout::*;

fn sample_session() -> EditorSession {
    let mut session = EditorSession::new();
    session
        .add_images(["a.jpg", "b.jpg", "c.png"])
        .unwrap();
    session.set_copies(4).unwrap();
    session.set_paper_size(PaperSize::A3).unwrap();
    session.set_margins(Margins::uniform(8.0)).unwrap();
    session.swap_slots(0, 7);

    let sources: Vec<String> = ["a.jpg", "b.jpg", "c.png"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    session
        .load_collage(&sources, CollageLayoutType::Grid { cols: 2, rows: 2 })
        .unwrap();
    session.mirror("photo-2").unwrap();
    session.set_scale("photo-0", 1.75).unwrap();
    session
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let session = sample_session();
    let state = session.snapshot();
    state.save(&path).await.unwrap();

    let loaded = EditorState::load(&path).await.unwrap();
    assert_eq!(loaded, state);

    let restored = EditorSession::from_state(loaded).unwrap();
    assert_eq!(restored.template(), session.template());
    assert_eq!(restored.sheets(), session.sheets());
    assert_eq!(restored.collage_photos(), session.collage_photos());
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = EditorState::load(dir.path().join("missing.json")).await;
    assert!(matches!(result, Err(LayoutError::Io(_))));
}

#[tokio::test]
async fn test_load_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    tokio::fs::write(&path, b"{ not json").await.unwrap();

    match EditorState::load(&path).await {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("editor state")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_partial_json_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    tokio::fs::write(&path, br#"{ "images": ["x.jpg"], "copies": 2 }"#)
        .await
        .unwrap();

    let state = EditorState::load(&path).await.unwrap();
    assert_eq!(state.images, vec!["x.jpg".to_string()]);
    assert_eq!(state.copies, 2);
    assert_eq!(state.paper_size, PaperSize::A4);
    assert_eq!(state.photo_size, PhotoSize::default());

    // Sheets were never saved, so restoring paginates them
    let session = EditorSession::from_state(state).unwrap();
    assert_eq!(session.sheets().len(), 1);
    assert_eq!(session.sheets()[0].filled(), 2);
}
