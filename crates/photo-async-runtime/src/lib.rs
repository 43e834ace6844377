use std::path::PathBuf;

mod background;
mod gate;
mod handlers;
mod history;
mod logger;
mod types;
mod worker;

pub use background::*;
pub use gate::{ExportGate, ExportPermit, PhotoClient};
pub use history::{HistoryEntry, HistoryStore, HistorySummary};
pub use logger::{AppLogger, LogEntry};
pub use types::*;
pub use worker::{WorkerContext, spawn_worker, worker_task};

// Re-export types from library crates
pub use photo_layout::{CollagePhoto, EditorState, SheetSet};
pub use photo_render::{ExportFormat, Rejection, RenderOptions};

/// Commands sent from a front end to the worker
#[derive(Debug)]
pub enum PhotoCommand {
    LoadImages {
        paths: Vec<PathBuf>,
    },
    ClearImages,
    ExportSheets {
        sheets: SheetSet,
        options: RenderOptions,
        format: ExportFormat,
        output_path: PathBuf,
        permit: ExportPermit,
    },
    ExportCollage {
        photos: Vec<CollagePhoto>,
        options: RenderOptions,
        format: ExportFormat,
        output_path: PathBuf,
        permit: ExportPermit,
    },
    SaveHistory {
        label: String,
        state: Box<EditorState>,
    },
    LoadHistory {
        id: String,
    },
    ListHistory,
    BackgroundEdit {
        photo_id: String,
        request: BackgroundRequest,
        last_good: String,
    },
}

/// Updates sent from the worker to a front end
#[derive(Debug, Clone)]
pub enum PhotoUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    ImagesLoaded {
        names: Vec<String>,
        rejected: Vec<Rejection>,
        total: usize,
    },
    ImagesCleared,
    ExportComplete {
        paths: Vec<PathBuf>,
    },
    HistorySaved {
        id: String,
    },
    HistoryLoaded {
        entry: Box<HistoryEntry>,
    },
    HistoryListed {
        entries: Vec<HistorySummary>,
    },
    BackgroundEditComplete {
        photo_id: String,
        image: String,
    },
    BackgroundEditFailed {
        photo_id: String,
        message: String,
        restored: String,
    },
    Error {
        message: String,
    },
}
