use crate::ingest::ImageLibrary;
use crate::raster::{render_collage, render_sheet};
use crate::types::*;
use crate::{pdf, png};
use image::RgbImage;
use photo_layout::{CollagePhoto, Sheet};
use std::path::{Path, PathBuf};

/// Write rasters in the requested format, returning the files written
pub async fn write_pages(
    pages: Vec<RgbImage>,
    format: ExportFormat,
    options: &RenderOptions,
    output_path: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let output_path = output_path.as_ref().to_owned();
    match format {
        ExportFormat::Pdf => {
            pdf::write_pdf(pages, options.paper, options.dpi, &output_path).await?;
            Ok(vec![output_path])
        }
        ExportFormat::Png => png::write_pngs(pages, &output_path).await,
    }
}

/// Render every sheet and write them out.
///
/// `on_sheet(done, total)` is called from the blocking pool after each sheet
/// is rasterized.
pub async fn export_sheets<F>(
    sheets: &[Sheet],
    library: &ImageLibrary,
    options: &RenderOptions,
    format: ExportFormat,
    output_path: impl AsRef<Path>,
    mut on_sheet: F,
) -> Result<Vec<PathBuf>>
where
    F: FnMut(usize, usize) + Send + 'static,
{
    options.validate()?;
    if sheets.is_empty() {
        return Err(RenderError::EmptyExport);
    }

    let sheets = sheets.to_vec();
    let library = library.clone();
    let render_options = *options;

    let pages = tokio::task::spawn_blocking(move || {
        let total = sheets.len();
        sheets
            .iter()
            .enumerate()
            .map(|(i, sheet)| {
                let page = render_sheet(sheet, &library, &render_options);
                on_sheet(i + 1, total);
                page
            })
            .collect::<Vec<_>>()
    })
    .await?;

    write_pages(pages, format, options, output_path).await
}

/// Render a collage to a single page and write it out
pub async fn export_collage(
    photos: &[CollagePhoto],
    library: &ImageLibrary,
    options: &RenderOptions,
    format: ExportFormat,
    output_path: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    options.validate()?;
    if photos.is_empty() {
        return Err(RenderError::EmptyExport);
    }

    let photos = photos.to_vec();
    let library = library.clone();
    let render_options = *options;

    let page =
        tokio::task::spawn_blocking(move || render_collage(&photos, &library, &render_options))
            .await?;

    write_pages(vec![page], format, options, output_path).await
}
