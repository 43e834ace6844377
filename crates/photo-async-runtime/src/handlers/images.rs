use crate::PhotoUpdate;
use photo_render::ImageLibrary;
use photo_render::ingest::load_image_files;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Decoded images the worker renders from
pub struct ImageStore {
    library: ImageLibrary,
}

impl ImageStore {
    pub fn new() -> Self {
        Self {
            library: ImageLibrary::new(),
        }
    }

    pub fn library(&self) -> &ImageLibrary {
        &self.library
    }
}

pub async fn handle_load(
    paths: Vec<PathBuf>,
    store: &mut ImageStore,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    match load_image_files(&paths, store.library.len()).await {
        Ok(report) => {
            store.library.extend_from(&report);
            let _ = update_tx.send(PhotoUpdate::ImagesLoaded {
                names: report.names(),
                rejected: report.rejected,
                total: store.library.len(),
            });
        }
        Err(e) => {
            let _ = update_tx.send(PhotoUpdate::Error {
                message: format!("Failed to load images: {}", e),
            });
        }
    }
}

pub fn handle_clear(store: &mut ImageStore, update_tx: &mpsc::UnboundedSender<PhotoUpdate>) {
    store.library = ImageLibrary::new();
    let _ = update_tx.send(PhotoUpdate::ImagesCleared);
}
