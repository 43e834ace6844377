use photo_layout::PaperSize;
use photo_layout::constants::{EXPORT_DPI, MAX_EXPORT_DPI};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to decode {name}: {reason}")]
    Decode { name: String, reason: String },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Nothing to export")]
    EmptyExport,
    #[error("Invalid render options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Output file type for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Png,
}

impl ExportFormat {
    /// Pick the format from a file extension, defaulting to PDF
    pub fn from_path(path: &std::path::Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => ExportFormat::Png,
            _ => ExportFormat::Pdf,
        }
    }
}

/// Stroke drawn around every sheet photo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderStyle {
    /// Width as shown in the on-screen preview
    pub display_px: f32,
    pub color: [u8; 3],
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            display_px: 1.0,
            color: [0, 0, 0],
        }
    }
}

/// Settings shared by every rasterization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub paper: PaperSize,
    pub dpi: f32,
    /// Width of the on-screen preview the user edited against. Display
    /// measurements (border width, pan offsets) are scaled from it.
    pub container_width_px: f32,
    pub border: Option<BorderStyle>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            dpi: EXPORT_DPI,
            container_width_px: 800.0,
            border: None,
        }
    }
}

impl RenderOptions {
    pub fn for_paper(paper: PaperSize) -> Self {
        Self {
            paper,
            ..Default::default()
        }
    }

    /// Reject settings that would produce an unusable or enormous canvas
    pub fn validate(&self) -> Result<()> {
        if !(self.dpi.is_finite() && self.dpi > 0.0 && self.dpi <= MAX_EXPORT_DPI) {
            return Err(RenderError::InvalidOptions(format!(
                "DPI must be between 0 and {}, got {}",
                MAX_EXPORT_DPI, self.dpi
            )));
        }
        if !self.container_width_px.is_finite() {
            return Err(RenderError::InvalidOptions(
                "Preview width must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpi_bounds() {
        assert!(RenderOptions::default().validate().is_ok());

        for dpi in [0.0, -72.0, f32::NAN, MAX_EXPORT_DPI + 1.0, 30000.0] {
            let options = RenderOptions {
                dpi,
                ..Default::default()
            };
            assert!(matches!(
                options.validate(),
                Err(RenderError::InvalidOptions(_))
            ));
        }
    }
}
