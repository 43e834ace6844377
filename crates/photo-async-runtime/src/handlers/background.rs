use crate::PhotoUpdate;
use crate::background::{
    BackgroundOutcome, BackgroundRequest, BackgroundService, run_background_edit,
};
use tokio::sync::mpsc;

pub async fn handle_edit<S: BackgroundService>(
    service: &S,
    photo_id: String,
    request: BackgroundRequest,
    last_good: String,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    let update = match run_background_edit(service, &request, &last_good).await {
        BackgroundOutcome::Updated(image) => {
            PhotoUpdate::BackgroundEditComplete { photo_id, image }
        }
        BackgroundOutcome::Failed {
            message, restored, ..
        } => PhotoUpdate::BackgroundEditFailed {
            photo_id,
            message: message.to_string(),
            restored,
        },
    };
    let _ = update_tx.send(update);
}
