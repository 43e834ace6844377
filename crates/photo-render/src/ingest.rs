//! Image ingestion
//!
//! Files are identified by content, not by extension. Batches keep going
//! past bad files and report each rejection.

use crate::types::*;
use image::{DynamicImage, ImageFormat};
use photo_layout::constants::MAX_IMAGES;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ACCEPTED_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::WebP,
    ImageFormat::Gif,
];

/// A decoded image ready for layout
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub name: String,
    pub format: ImageFormat,
    pub image: DynamicImage,
}

impl LoadedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// A file that didn't make it into the batch
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct IngestReport {
    pub loaded: Vec<LoadedImage>,
    pub rejected: Vec<Rejection>,
}

impl IngestReport {
    pub fn names(&self) -> Vec<String> {
        self.loaded.iter().map(|img| img.name.clone()).collect()
    }
}

/// Sniff the format from the leading bytes
pub fn detect_format(name: &str, bytes: &[u8]) -> Result<ImageFormat> {
    let format = image::guess_format(bytes)
        .map_err(|_| RenderError::UnsupportedFormat(name.to_string()))?;
    if ACCEPTED_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(RenderError::UnsupportedFormat(format!(
            "{} ({})",
            name,
            format.extensions_str().first().copied().unwrap_or("unknown")
        )))
    }
}

/// Decode one file
pub fn ingest_image(name: &str, bytes: &[u8]) -> Result<LoadedImage> {
    let format = detect_format(name, bytes)?;
    let image = image::load_from_memory_with_format(bytes, format).map_err(|e| {
        RenderError::Decode {
            name: name.to_string(),
            reason: e.to_string(),
        }
    })?;

    log::debug!(
        "Decoded {} as {:?} ({}x{})",
        name,
        format,
        image.width(),
        image.height()
    );

    Ok(LoadedImage {
        name: name.to_string(),
        format,
        image,
    })
}

/// Decode a batch of named files.
///
/// `already_loaded` counts images the session holds before this batch; files
/// past the session limit are rejected rather than decoded.
pub fn ingest_batch(files: Vec<(String, Vec<u8>)>, already_loaded: usize) -> IngestReport {
    let mut report = IngestReport::default();

    for (name, bytes) in files {
        if already_loaded + report.loaded.len() >= MAX_IMAGES {
            report.rejected.push(Rejection {
                name,
                reason: format!("Image limit of {} reached", MAX_IMAGES),
            });
            continue;
        }

        match ingest_image(&name, &bytes) {
            Ok(image) => report.loaded.push(image),
            Err(e) => {
                log::warn!("Skipping {}: {}", name, e);
                report.rejected.push(Rejection {
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    log::info!(
        "Ingested {} image(s), rejected {}",
        report.loaded.len(),
        report.rejected.len()
    );
    report
}

/// Read and decode image files from disk
pub async fn load_image_files(paths: &[PathBuf], already_loaded: usize) -> Result<IngestReport> {
    let mut files = Vec::with_capacity(paths.len());
    let mut unreadable = Vec::new();

    for path in paths {
        let name = path.to_string_lossy().into_owned();
        match tokio::fs::read(path).await {
            Ok(bytes) => files.push((name, bytes)),
            Err(e) => unreadable.push(Rejection {
                name,
                reason: e.to_string(),
            }),
        }
    }

    let mut report =
        tokio::task::spawn_blocking(move || ingest_batch(files, already_loaded)).await?;
    report.rejected.extend(unreadable);
    Ok(report)
}

/// Decoded images keyed by source name. Cloning shares the pixel data.
#[derive(Debug, Clone, Default)]
pub struct ImageLibrary {
    images: HashMap<String, Arc<DynamicImage>>,
}

impl ImageLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, image: DynamicImage) {
        self.images.insert(name.into(), Arc::new(image));
    }

    pub fn get(&self, name: &str) -> Option<&DynamicImage> {
        self.images.get(name).map(Arc::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.images.remove(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Add everything a batch loaded
    pub fn extend_from(&mut self, report: &IngestReport) {
        for img in &report.loaded {
            self.insert(img.name.clone(), img.image.clone());
        }
    }

    /// Load files straight into a fresh library
    pub async fn from_paths(paths: &[impl AsRef<Path>]) -> Result<(Self, IngestReport)> {
        let paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_owned()).collect();
        let report = load_image_files(&paths, 0).await?;
        let mut library = Self::new();
        library.extend_from(&report);
        Ok((library, report))
    }
}
