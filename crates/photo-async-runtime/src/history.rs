//! Saved editing sessions
//!
//! Each entry is one JSON file named after its id inside the history
//! directory.

use crate::types::*;
use chrono::{DateTime, Utc};
use photo_layout::EditorState;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub label: String,
    pub state: EditorState,
}

/// Listing view of an entry, without the full state
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub label: String,
    pub image_count: usize,
}

impl From<&HistoryEntry> for HistorySummary {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            created_at: entry.created_at,
            label: entry.label.clone(),
            image_count: entry.state.images.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RuntimeError::History(format!("Invalid entry id: {:?}", id)));
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }

    /// Snapshot `state` under `label`
    pub async fn save(&self, label: &str, state: &EditorState) -> Result<HistoryEntry> {
        state.validate()?;

        let created_at = Utc::now();
        let sequence = NEXT_SEQUENCE.fetch_add(1, Ordering::SeqCst);
        let entry = HistoryEntry {
            id: format!("{}-{}", created_at.format("%Y%m%d%H%M%S%3f"), sequence),
            created_at,
            label: label.to_string(),
            state: state.clone(),
        };

        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(&entry)?;
        tokio::fs::write(self.entry_path(&entry.id)?, json).await?;

        log::info!("Saved history entry {} ({})", entry.id, entry.label);
        Ok(entry)
    }

    pub async fn load(&self, id: &str) -> Result<HistoryEntry> {
        let path = self.entry_path(id)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RuntimeError::History(format!("No history entry {}", id)));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// All entries, newest first. Unreadable files are skipped.
    pub async fn list(&self) -> Result<Vec<HistorySummary>> {
        let mut dir = match tokio::fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut summaries = Vec::new();
        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let parsed = tokio::fs::read(&path)
                .await
                .map_err(RuntimeError::from)
                .and_then(|bytes| Ok(serde_json::from_slice::<HistoryEntry>(&bytes)?));
            match parsed {
                Ok(entry) => summaries.push(HistorySummary::from(&entry)),
                Err(e) => log::warn!("Skipping history file {}: {}", path.display(), e),
            }
        }

        summaries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(summaries)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        tokio::fs::remove_file(self.entry_path(id)?).await?;
        Ok(())
    }
}
