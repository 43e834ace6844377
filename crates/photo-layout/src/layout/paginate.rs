//! Sheet pagination
//!
//! Repeats every image `copies` times (all copies of the first image, then
//! all copies of the second, ...) and deals the result onto sheets in
//! template order.

use super::{PageTemplate, PlacedPhoto, Sheet, SheetSet};

/// Flatten images × copies in image order, without interleaving
pub fn expand_copies(images: &[String], copies: usize) -> Vec<&str> {
    images
        .iter()
        .flat_map(|image| std::iter::repeat_n(image.as_str(), copies))
        .collect()
}

/// Partition the image list into sheets using the template.
///
/// An empty template yields an empty set regardless of how many images
/// there are; that is the "layout not generatable" state, not an error.
pub fn paginate(images: &[String], copies: usize, template: &PageTemplate) -> SheetSet {
    if template.is_empty() {
        return SheetSet::new();
    }

    let sources = expand_copies(images, copies);

    sources
        .chunks(template.len())
        .map(|chunk| Sheet {
            photos: template
                .slots
                .iter()
                .enumerate()
                .map(|(i, slot)| PlacedPhoto {
                    slot: *slot,
                    image_source: chunk.get(i).map(|s| s.to_string()),
                })
                .collect(),
        })
        .collect()
}

/// Number of sheets `paginate` would produce, without building them
pub fn sheet_count(image_count: usize, copies: usize, slots_per_sheet: usize) -> usize {
    if slots_per_sheet == 0 {
        return 0;
    }
    image_count
        .saturating_mul(copies)
        .div_ceil(slots_per_sheet)
}

// =============================================================================
// Tests
// =============================================================================
