//! Single-flight export control
//!
//! At most one export runs at a time. A second request while one is in
//! flight is rejected with [`RuntimeError::Busy`], never queued.

use crate::PhotoCommand;
use crate::background::BackgroundRequest;
use crate::types::*;
use photo_layout::{CollagePhoto, EditorState, SheetSet};
use photo_render::{ExportFormat, RenderOptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Default)]
pub struct ExportGate {
    busy: Arc<AtomicBool>,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. Returns `None` while another export holds it.
    pub fn try_acquire(&self) -> Option<ExportPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof of holding the export gate; releases it when dropped
#[derive(Debug)]
pub struct ExportPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for ExportPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Front-end handle for sending commands to the worker
#[derive(Debug, Clone)]
pub struct PhotoClient {
    command_tx: mpsc::UnboundedSender<PhotoCommand>,
    gate: ExportGate,
}

impl PhotoClient {
    pub fn new(command_tx: mpsc::UnboundedSender<PhotoCommand>, gate: ExportGate) -> Self {
        Self { command_tx, gate }
    }

    pub fn gate(&self) -> &ExportGate {
        &self.gate
    }

    pub fn is_exporting(&self) -> bool {
        self.gate.is_busy()
    }

    fn send(&self, command: PhotoCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| RuntimeError::WorkerGone)
    }

    pub fn load_images(&self, paths: Vec<PathBuf>) -> Result<()> {
        self.send(PhotoCommand::LoadImages { paths })
    }

    pub fn clear_images(&self) -> Result<()> {
        self.send(PhotoCommand::ClearImages)
    }

    pub fn export_sheets(
        &self,
        sheets: SheetSet,
        options: RenderOptions,
        format: ExportFormat,
        output_path: PathBuf,
    ) -> Result<()> {
        let permit = self.gate.try_acquire().ok_or(RuntimeError::Busy)?;
        self.send(PhotoCommand::ExportSheets {
            sheets,
            options,
            format,
            output_path,
            permit,
        })
    }

    pub fn export_collage(
        &self,
        photos: Vec<CollagePhoto>,
        options: RenderOptions,
        format: ExportFormat,
        output_path: PathBuf,
    ) -> Result<()> {
        let permit = self.gate.try_acquire().ok_or(RuntimeError::Busy)?;
        self.send(PhotoCommand::ExportCollage {
            photos,
            options,
            format,
            output_path,
            permit,
        })
    }

    pub fn save_history(&self, label: impl Into<String>, state: EditorState) -> Result<()> {
        self.send(PhotoCommand::SaveHistory {
            label: label.into(),
            state: Box::new(state),
        })
    }

    pub fn load_history(&self, id: impl Into<String>) -> Result<()> {
        self.send(PhotoCommand::LoadHistory { id: id.into() })
    }

    pub fn list_history(&self) -> Result<()> {
        self.send(PhotoCommand::ListHistory)
    }

    pub fn background_edit(
        &self,
        photo_id: impl Into<String>,
        request: BackgroundRequest,
        last_good: impl Into<String>,
    ) -> Result<()> {
        self.send(PhotoCommand::BackgroundEdit {
            photo_id: photo_id.into(),
            request,
            last_good: last_good.into(),
        })
    }
}
