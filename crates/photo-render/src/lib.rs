mod export;
pub mod ingest;
pub mod pdf;
pub mod png;
pub mod raster;
mod types;

pub use export::{export_collage, export_sheets, write_pages};
pub use ingest::{ImageLibrary, IngestReport, LoadedImage, Rejection, ingest_batch, ingest_image};
pub use raster::{canvas_size_px, export_border_width, render_collage, render_sheet};
pub use types::*;
