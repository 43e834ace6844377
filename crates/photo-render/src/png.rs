//! PNG output: one file per sheet

use crate::types::*;
use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// File names for `count` sheets.
///
/// A single sheet keeps `path`; more get `stem-1.png`, `stem-2.png`, ...
/// next to it.
pub fn sheet_paths(path: &Path, count: usize) -> Vec<PathBuf> {
    if count == 1 {
        return vec![path.to_owned()];
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sheet".to_string());
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    (1..=count)
        .map(|n| parent.join(format!("{}-{}.png", stem, n)))
        .collect()
}

pub fn encode_png(page: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    page.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encode and write every page, returning the paths written
pub async fn write_pngs(
    pages: Vec<RgbImage>,
    output_path: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    if pages.is_empty() {
        return Err(RenderError::EmptyExport);
    }

    let paths = sheet_paths(output_path.as_ref(), pages.len());
    let encoded = tokio::task::spawn_blocking(move || {
        pages.iter().map(encode_png).collect::<Result<Vec<_>>>()
    })
    .await??;

    for (path, bytes) in paths.iter().zip(encoded) {
        tokio::fs::write(path, bytes).await?;
        log::info!("Wrote {}", path.display());
    }

    Ok(paths)
}
