use crate::background::BackgroundService;
use crate::gate::{ExportGate, PhotoClient};
use crate::history::HistoryStore;
use crate::{PhotoCommand, PhotoUpdate, handlers};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Long-lived resources the worker owns
pub struct WorkerContext<S> {
    pub history: HistoryStore,
    pub background: S,
}

/// Start a worker on the current runtime and return a client for it
pub fn spawn_worker<S: BackgroundService>(
    context: WorkerContext<S>,
) -> (PhotoClient, mpsc::UnboundedReceiver<PhotoUpdate>, JoinHandle<()>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(worker_task(command_rx, update_tx, context));
    (
        PhotoClient::new(command_tx, ExportGate::new()),
        update_rx,
        handle,
    )
}

/// Async worker task that processes photo commands and sends updates.
///
/// Commands run one at a time in arrival order.
pub async fn worker_task<S: BackgroundService>(
    mut command_rx: mpsc::UnboundedReceiver<PhotoCommand>,
    update_tx: mpsc::UnboundedSender<PhotoUpdate>,
    context: WorkerContext<S>,
) {
    let mut image_store = handlers::images::ImageStore::new();

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut image_store, &context, &update_tx).await;
    }

    log::debug!("Command channel closed, worker stopping");
}

async fn process_command<S: BackgroundService>(
    cmd: PhotoCommand,
    image_store: &mut handlers::images::ImageStore,
    context: &WorkerContext<S>,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    match cmd {
        PhotoCommand::LoadImages { paths } => {
            handlers::images::handle_load(paths, image_store, update_tx).await;
        }
        PhotoCommand::ClearImages => {
            handlers::images::handle_clear(image_store, update_tx);
        }
        PhotoCommand::ExportSheets {
            sheets,
            options,
            format,
            output_path,
            permit,
        } => {
            handlers::export::handle_export_sheets(
                sheets,
                options,
                format,
                output_path,
                image_store,
                permit,
                update_tx,
            )
            .await;
        }
        PhotoCommand::ExportCollage {
            photos,
            options,
            format,
            output_path,
            permit,
        } => {
            handlers::export::handle_export_collage(
                photos,
                options,
                format,
                output_path,
                image_store,
                permit,
                update_tx,
            )
            .await;
        }
        PhotoCommand::SaveHistory { label, state } => {
            handlers::history::handle_save(&context.history, label, *state, update_tx).await;
        }
        PhotoCommand::LoadHistory { id } => {
            handlers::history::handle_load(&context.history, id, update_tx).await;
        }
        PhotoCommand::ListHistory => {
            handlers::history::handle_list(&context.history, update_tx).await;
        }
        PhotoCommand::BackgroundEdit {
            photo_id,
            request,
            last_good,
        } => {
            handlers::background::handle_edit(
                &context.background,
                photo_id,
                request,
                last_good,
                update_tx,
            )
            .await;
        }
    }
}
