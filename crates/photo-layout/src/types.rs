use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Too many images: {count} (maximum is {max})")]
    TooManyImages { count: usize, max: usize },
    #[error("A collage needs at least {min} images, got {count}")]
    TooFewImages { count: usize, min: usize },
    #[error("Unknown photo: {0}")]
    UnknownPhoto(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Standard output paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    #[default]
    A4,
    A3,
    /// 4" × 6" photo paper
    Photo4x6,
    /// 5" × 7" photo paper
    Photo5x7,
}

impl PaperSize {
    pub const ALL: [PaperSize; 4] = [
        PaperSize::A4,
        PaperSize::A3,
        PaperSize::Photo4x6,
        PaperSize::Photo5x7,
    ];

    /// Page dimensions in millimetres (width, height), always portrait
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::Photo4x6 => (101.6, 152.4),
            PaperSize::Photo5x7 => (127.0, 177.8),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A3 => "A3",
            PaperSize::Photo4x6 => "4x6",
            PaperSize::Photo5x7 => "5x7",
        }
    }
}

/// Page margins in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub top_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
    pub right_mm: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(5.0)
    }
}

impl Margins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            top_mm: margin_mm,
            bottom_mm: margin_mm,
            left_mm: margin_mm,
            right_mm: margin_mm,
        }
    }

    pub fn zero() -> Self {
        Self::uniform(0.0)
    }

    fn is_valid(&self) -> bool {
        [self.top_mm, self.bottom_mm, self.left_mm, self.right_mm]
            .iter()
            .all(|m| m.is_finite() && *m >= 0.0)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.is_valid() {
            return Err(LayoutError::Config(
                "Margins must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Physical size of one printed photo, in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhotoSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl Default for PhotoSize {
    /// Passport-style 35 × 45 mm
    fn default() -> Self {
        Self {
            width_mm: 35.0,
            height_mm: 45.0,
        }
    }
}

/// A rectangle expressed in percent of the page (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PercentRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate (y grows downwards)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink the rectangle by `amount` on every side
    pub fn inset(&self, amount: f32) -> PercentRect {
        PercentRect::new(
            self.x + amount,
            self.y + amount,
            self.width - 2.0 * amount,
            self.height - 2.0 * amount,
        )
    }

    /// True when the interiors intersect; touching edges do not count
    pub fn overlaps(&self, other: &PercentRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Map onto a pixel canvas, returning (x, y, width, height) in pixels
    pub fn to_pixels(&self, canvas_width: u32, canvas_height: u32) -> (i64, i64, u32, u32) {
        let cw = canvas_width as f32;
        let ch = canvas_height as f32;
        let x = (self.x / 100.0 * cw).round() as i64;
        let y = (self.y / 100.0 * ch).round() as i64;
        let right = (self.right() / 100.0 * cw).round() as i64;
        let bottom = (self.bottom() / 100.0 * ch).round() as i64;
        (
            x,
            y,
            (right - x).max(0) as u32,
            (bottom - y).max(0) as u32,
        )
    }
}

/// Statistics about a sheet layout
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStatistics {
    /// Columns in the page template
    pub columns: usize,
    /// Rows in the page template
    pub rows: usize,
    /// Slots on each sheet
    pub slots_per_sheet: usize,
    /// Total photos to print (images × copies)
    pub source_photos: usize,
    /// Number of output sheets
    pub sheets: usize,
    /// Unused slots on the final sheet
    pub empty_slots: usize,
    /// False when the sizing leaves no room for a single slot
    pub generatable: bool,
}
