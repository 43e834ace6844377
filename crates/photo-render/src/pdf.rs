//! PDF assembly: one full-page image per sheet

use crate::types::{RenderError, Result};
use ::image::RgbImage;
use photo_layout::PaperSize;
use printpdf::*;
use std::path::Path;

/// Build a PDF with one page per raster at the paper size
pub fn build_pdf(pages: &[RgbImage], paper: PaperSize, dpi: f32, title: &str) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(RenderError::EmptyExport);
    }
    if !(dpi.is_finite() && dpi > 0.0) {
        return Err(RenderError::Pdf(format!("Invalid export DPI: {}", dpi)));
    }

    let (width_mm, height_mm) = paper.dimensions_mm();
    let mut doc = PdfDocument::new(title);

    for page in pages {
        let raw = RawImage {
            pixels: RawImageData::U8(page.as_raw().clone()),
            width: page.width() as usize,
            height: page.height() as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let image_id = doc.add_image(&raw);

        // At the export DPI the raster covers the page exactly
        let ops = vec![Op::UseXobject {
            id: image_id,
            transform: XObjectTransform {
                dpi: Some(dpi),
                ..Default::default()
            },
        }];
        doc.pages
            .push(PdfPage::new(Mm(width_mm), Mm(height_mm), ops));
    }

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        log::debug!("PDF assembled with {} warning(s)", warnings.len());
    }

    Ok(bytes)
}

/// Assemble and write a PDF
pub async fn write_pdf(
    pages: Vec<RgbImage>,
    paper: PaperSize,
    dpi: f32,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let output_path = output_path.as_ref().to_owned();
    let title = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Photo sheets".to_string());

    let bytes =
        tokio::task::spawn_blocking(move || build_pdf(&pages, paper, dpi, &title)).await??;

    tokio::fs::write(&output_path, bytes).await?;
    log::info!("Wrote {}", output_path.display());

    Ok(())
}
