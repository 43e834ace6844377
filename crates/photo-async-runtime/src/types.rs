use photo_layout::LayoutError;
use photo_render::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("An export is already in progress")]
    Busy,
    #[error("The worker has stopped")]
    WorkerGone,
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("History error: {0}")]
    History(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
