use super::images::ImageStore;
use crate::PhotoUpdate;
use crate::gate::ExportPermit;
use photo_layout::{CollagePhoto, SheetSet};
use photo_render::{ExportFormat, RenderOptions, export_collage, export_sheets};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_export_sheets(
    sheets: SheetSet,
    options: RenderOptions,
    format: ExportFormat,
    output_path: PathBuf,
    store: &ImageStore,
    permit: ExportPermit,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    let progress_tx = update_tx.clone();
    let result = export_sheets(
        &sheets,
        store.library(),
        &options,
        format,
        &output_path,
        move |current, total| {
            let _ = progress_tx.send(PhotoUpdate::Progress {
                operation: "Rendering sheets".to_string(),
                current,
                total,
            });
        },
    )
    .await;

    // Release the gate before reporting so the front end can export again
    drop(permit);

    match result {
        Ok(paths) => {
            let _ = update_tx.send(PhotoUpdate::ExportComplete { paths });
        }
        Err(e) => {
            log::error!("Sheet export failed: {}", e);
            let _ = update_tx.send(PhotoUpdate::Error {
                message: format!("Failed to export sheets: {}", e),
            });
        }
    }
}

pub async fn handle_export_collage(
    photos: Vec<CollagePhoto>,
    options: RenderOptions,
    format: ExportFormat,
    output_path: PathBuf,
    store: &ImageStore,
    permit: ExportPermit,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    let _ = update_tx.send(PhotoUpdate::Progress {
        operation: "Rendering collage".to_string(),
        current: 0,
        total: 1,
    });

    let result = export_collage(&photos, store.library(), &options, format, &output_path).await;
    drop(permit);

    match result {
        Ok(paths) => {
            let _ = update_tx.send(PhotoUpdate::Progress {
                operation: "Rendering collage".to_string(),
                current: 1,
                total: 1,
            });
            let _ = update_tx.send(PhotoUpdate::ExportComplete { paths });
        }
        Err(e) => {
            log::error!("Collage export failed: {}", e);
            let _ = update_tx.send(PhotoUpdate::Error {
                message: format!("Failed to export collage: {}", e),
            });
        }
    }
}
