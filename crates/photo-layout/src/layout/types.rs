//! Layout data types for photo sheets
//!
//! A template is computed once per sizing configuration; sheets copy the
//! template geometry and only ever change which image sits in each slot.

use crate::types::PercentRect;

/// One placeholder rectangle of the page template
///
/// All geometry is in percent of the full page, so consumers never need the
/// paper size again.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageTemplateSlot {
    /// Row-major index (`row * cols + col`), stable while the template is
    pub id: usize,
    pub x_percent: f32,
    pub y_percent: f32,
    pub width_percent: f32,
    pub height_percent: f32,
}

impl PageTemplateSlot {
    pub fn rect(&self) -> PercentRect {
        PercentRect::new(
            self.x_percent,
            self.y_percent,
            self.width_percent,
            self.height_percent,
        )
    }
}

/// The computed page template
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageTemplate {
    /// Number of columns that fit the printable width
    pub cols: usize,
    /// Number of rows that fit the printable height
    pub rows: usize,
    /// Accepted slots in row-major order
    pub slots: Vec<PageTemplateSlot>,
}

impl PageTemplate {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// An empty template means the layout cannot be generated
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// A template slot with the image assigned to it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedPhoto {
    pub slot: PageTemplateSlot,
    /// Image reference, `None` for an empty slot
    pub image_source: Option<String>,
}

impl PlacedPhoto {
    pub fn id(&self) -> usize {
        self.slot.id
    }

    pub fn is_empty(&self) -> bool {
        self.image_source.is_none()
    }
}

/// One printable page: one placed photo per template slot
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sheet {
    pub photos: Vec<PlacedPhoto>,
}

impl Sheet {
    /// Number of slots holding an image
    pub fn filled(&self) -> usize {
        self.photos.iter().filter(|p| !p.is_empty()).count()
    }
}

/// Full paginated output for an image set
pub type SheetSet = Vec<Sheet>;
