use image::{DynamicImage, Rgb, RgbImage};
use photo_layout::*;
use photo_render::*;

fn library(names: &[&str]) -> ImageLibrary {
    let mut library = ImageLibrary::new();
    for name in names {
        library.insert(
            *name,
            DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([10, 120, 200]))),
        );
    }
    library
}

fn small_options() -> RenderOptions {
    RenderOptions {
        dpi: 20.0,
        ..RenderOptions::default()
    }
}

fn sheets_for(images: usize, copies: usize) -> SheetSet {
    let state = EditorState {
        images: (0..images).map(|i| format!("{}.png", i)).collect(),
        copies,
        ..Default::default()
    };
    let template = compute_template(&state.template_input());
    paginate(&state.images, state.copies, &template)
}

#[tokio::test]
async fn test_pdf_has_one_page_per_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheets.pdf");

    let sheets = sheets_for(2, 20);
    assert_eq!(sheets.len(), 2);

    let written = export_sheets(
        &sheets,
        &library(&["0.png", "1.png"]),
        &small_options(),
        ExportFormat::Pdf,
        &path,
        |_, _| {},
    )
    .await
    .unwrap();
    assert_eq!(written, vec![path.clone()]);

    let doc = lopdf::Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[tokio::test]
async fn test_progress_reports_every_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, rx) = std::sync::mpsc::channel();

    export_sheets(
        &sheets_for(1, 61),
        &library(&["0.png"]),
        &small_options(),
        ExportFormat::Pdf,
        dir.path().join("progress.pdf"),
        move |done, total| {
            tx.send((done, total)).unwrap();
        },
    )
    .await
    .unwrap();

    let seen: Vec<(usize, usize)> = rx.try_iter().collect();
    assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
}

#[tokio::test]
async fn test_png_export_numbers_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheets.png");

    let written = export_sheets(
        &sheets_for(1, 31),
        &library(&["0.png"]),
        &small_options(),
        ExportFormat::Png,
        &path,
        |_, _| {},
    )
    .await
    .unwrap();

    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("sheets-1.png"));
    for file in &written {
        let img = image::open(file).unwrap();
        assert_eq!(
            (img.width(), img.height()),
            canvas_size_px(PaperSize::A4, 20.0)
        );
    }
}

#[tokio::test]
async fn test_empty_export_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = export_sheets(
        &[],
        &ImageLibrary::new(),
        &small_options(),
        ExportFormat::Pdf,
        dir.path().join("empty.pdf"),
        |_, _| {},
    )
    .await;
    assert!(matches!(result, Err(RenderError::EmptyExport)));
    assert!(!dir.path().join("empty.pdf").exists());
}

#[tokio::test]
async fn test_oversized_dpi_is_rejected_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("huge.pdf");
    let options = RenderOptions {
        dpi: 30000.0,
        ..RenderOptions::default()
    };
    let result = export_sheets(
        &sheets_for(2, 1),
        &library(&["0.png", "1.png"]),
        &options,
        ExportFormat::Pdf,
        &output,
        |_, _| panic!("nothing should render"),
    )
    .await;
    assert!(matches!(result, Err(RenderError::InvalidOptions(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_collage_export_single_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collage.png");
    let sources = vec!["a.png".to_string(), "b.png".to_string()];
    let photos = CollageLayoutType::Mosaic.arrange(&sources);

    let written = export_collage(
        &photos,
        &library(&["a.png", "b.png"]),
        &small_options(),
        ExportFormat::Png,
        &path,
    )
    .await
    .unwrap();
    assert_eq!(written, vec![path.clone()]);
    assert!(path.exists());
}

#[test]
fn test_format_from_extension() {
    use std::path::Path;
    assert_eq!(ExportFormat::from_path(Path::new("a.PNG")), ExportFormat::Png);
    assert_eq!(ExportFormat::from_path(Path::new("a.pdf")), ExportFormat::Pdf);
    assert_eq!(ExportFormat::from_path(Path::new("a")), ExportFormat::Pdf);
}
