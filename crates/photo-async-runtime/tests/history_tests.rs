use photo_async_runtime::*;
use photo_layout::{CollageLayoutType, EditorSession, PhotoSize};

fn session() -> EditorSession {
    let mut session = EditorSession::new();
    session.add_images(["one.jpg", "two.jpg", "three.jpg"]).unwrap();
    session
        .set_photo_size(PhotoSize {
            width_mm: 25.0,
            height_mm: 30.0,
        })
        .unwrap();
    session.swap_slots(0, 2);
    let sources: Vec<String> = session.state().images.clone();
    session
        .load_collage(&sources, CollageLayoutType::Mosaic)
        .unwrap();
    session
}

#[tokio::test]
async fn test_save_then_load_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());
    let session = session();

    let saved = store.save("first", &session.snapshot()).await.unwrap();
    let loaded = store.load(&saved.id).await.unwrap();

    assert_eq!(loaded, saved);
    let restored = photo_layout::EditorSession::from_state(loaded.state).unwrap();
    assert_eq!(restored.template(), session.template());
    assert_eq!(restored.sheets(), session.sheets());
    assert_eq!(restored.collage_photos(), session.collage_photos());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());
    let state = session().snapshot();

    let first = store.save("first", &state).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = store.save("second", &state).await.unwrap();

    let ids: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_missing_directory_lists_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path().join("nothing-here"));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());
    store.save("ok", &session().snapshot()).await.unwrap();
    tokio::fs::write(dir.path().join("broken.json"), b"{").await.unwrap();

    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejects_path_like_ids() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());
    assert!(matches!(
        store.load("../etc/passwd").await,
        Err(RuntimeError::History(_))
    ));
    assert!(matches!(
        store.load("unknown").await,
        Err(RuntimeError::History(_))
    ));
}

#[tokio::test]
async fn test_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());
    let entry = store.save("gone", &session().snapshot()).await.unwrap();
    store.delete(&entry.id).await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
}
