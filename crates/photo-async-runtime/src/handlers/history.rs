use crate::PhotoUpdate;
use crate::history::HistoryStore;
use photo_layout::EditorState;
use tokio::sync::mpsc;

pub async fn handle_save(
    store: &HistoryStore,
    label: String,
    state: EditorState,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    match store.save(&label, &state).await {
        Ok(entry) => {
            let _ = update_tx.send(PhotoUpdate::HistorySaved { id: entry.id });
        }
        Err(e) => {
            let _ = update_tx.send(PhotoUpdate::Error {
                message: format!("Failed to save history: {}", e),
            });
        }
    }
}

pub async fn handle_load(
    store: &HistoryStore,
    id: String,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    match store.load(&id).await {
        Ok(entry) => {
            let _ = update_tx.send(PhotoUpdate::HistoryLoaded {
                entry: Box::new(entry),
            });
        }
        Err(e) => {
            let _ = update_tx.send(PhotoUpdate::Error {
                message: format!("Failed to load history entry {}: {}", id, e),
            });
        }
    }
}

pub async fn handle_list(store: &HistoryStore, update_tx: &mpsc::UnboundedSender<PhotoUpdate>) {
    match store.list().await {
        Ok(entries) => {
            let _ = update_tx.send(PhotoUpdate::HistoryListed { entries });
        }
        Err(e) => {
            let _ = update_tx.send(PhotoUpdate::Error {
                message: format!("Failed to list history: {}", e),
            });
        }
    }
}
