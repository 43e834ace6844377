//! Page template calculation
//!
//! Packs as many photos of a fixed physical size as fit into the printable
//! area of a page. The grid is centred horizontally and top-aligned
//! vertically; output coordinates are percent of the whole page.

use crate::constants::SLOT_FIT_TOLERANCE_MM;
use crate::types::{Margins, PaperSize, PhotoSize};

use super::{PageTemplate, PageTemplateSlot};

/// Sizing inputs for the page template, all in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateInput {
    pub paper: PaperSize,
    pub photo: PhotoSize,
    pub spacing_mm: f32,
    pub margins: Margins,
}

/// Number of cells of size `cell` separated by `spacing` that fit `available`.
///
/// Returns 0 whenever the arithmetic yields a non-positive count.
fn fit_count(available: f32, cell: f32, spacing: f32) -> usize {
    let pitch = cell + spacing;
    if !(pitch > 0.0) || !(cell > 0.0) {
        return 0;
    }
    let count = ((available + spacing) / pitch).floor();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Compute the page template for the given sizing.
///
/// An empty template is a valid result: it means the photo size, spacing and
/// margins leave no room for a single slot.
pub fn compute_template(input: &TemplateInput) -> PageTemplate {
    let (page_width, page_height) = input.paper.dimensions_mm();
    let margins = &input.margins;
    let photo = &input.photo;
    let spacing = input.spacing_mm;

    let printable_width = page_width - margins.left_mm - margins.right_mm;
    let printable_height = page_height - margins.top_mm - margins.bottom_mm;

    let cols = fit_count(printable_width, photo.width_mm, spacing);
    let rows = fit_count(printable_height, photo.height_mm, spacing);

    if cols == 0 || rows == 0 {
        log::debug!(
            "No slots fit: printable {printable_width}x{printable_height}mm, photo {}x{}mm",
            photo.width_mm,
            photo.height_mm
        );
        return PageTemplate::default();
    }

    let total_grid_width = cols as f32 * photo.width_mm + (cols - 1) as f32 * spacing;
    let start_x = margins.left_mm + (printable_width - total_grid_width) / 2.0;
    let start_y = margins.top_mm;

    let max_x = margins.left_mm + printable_width + SLOT_FIT_TOLERANCE_MM;
    let max_y = margins.top_mm + printable_height + SLOT_FIT_TOLERANCE_MM;
    let min_x = margins.left_mm - SLOT_FIT_TOLERANCE_MM;
    let min_y = margins.top_mm - SLOT_FIT_TOLERANCE_MM;

    let mut slots = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let x = start_x + col as f32 * (photo.width_mm + spacing);
            let y = start_y + row as f32 * (photo.height_mm + spacing);

            let fits = x >= min_x
                && y >= min_y
                && x + photo.width_mm <= max_x
                && y + photo.height_mm <= max_y;
            if !fits {
                continue;
            }

            slots.push(PageTemplateSlot {
                id: row * cols + col,
                x_percent: x / page_width * 100.0,
                y_percent: y / page_height * 100.0,
                width_percent: photo.width_mm / page_width * 100.0,
                height_percent: photo.height_mm / page_height * 100.0,
            });
        }
    }

    PageTemplate { cols, rows, slots }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(photo_w: f32, photo_h: f32, spacing: f32, margins: Margins) -> TemplateInput {
        TemplateInput {
            paper: PaperSize::A4,
            photo: PhotoSize {
                width_mm: photo_w,
                height_mm: photo_h,
            },
            spacing_mm: spacing,
            margins,
        }
    }

    #[test]
    fn test_passport_photos_on_a4() {
        let template = compute_template(&input(35.0, 45.0, 0.0, Margins::zero()));

        assert_eq!(template.cols, 6);
        assert_eq!(template.rows, 6);
        assert_eq!(template.len(), 36);

        for (i, a) in template.slots.iter().enumerate() {
            let r = a.rect().inset(1e-3);
            assert!(r.x >= 0.0 && r.right() <= 100.0);
            assert!(r.y >= 0.0 && r.bottom() <= 100.0);
            for b in &template.slots[i + 1..] {
                assert!(!r.overlaps(&b.rect()), "slots {} and {} overlap", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_ids_are_row_major() {
        let template = compute_template(&input(35.0, 45.0, 0.0, Margins::zero()));
        for (i, slot) in template.slots.iter().enumerate() {
            assert_eq!(slot.id, i);
        }
        // Slot 7 is row 1, col 1
        let slot = &template.slots[7];
        assert!((slot.x_percent - 35.0 / 210.0 * 100.0).abs() < 1e-3);
        assert!((slot.y_percent - 45.0 / 297.0 * 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_grid_is_centered_horizontally_and_top_aligned() {
        // 50mm photos with 10mm spacing on a 200mm printable width
        let template = compute_template(&input(50.0, 50.0, 10.0, Margins::uniform(5.0)));
        assert_eq!(template.cols, 3);

        // 3 cols: 3*50 + 2*10 = 170, printable 200 -> start at 5 + 15 = 20mm
        let first = &template.slots[0];
        assert!((first.x_percent - 20.0 / 210.0 * 100.0).abs() < 1e-3);
        assert!((first.y_percent - 5.0 / 297.0 * 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_spacing_reduces_count() {
        let tight = compute_template(&input(35.0, 45.0, 0.0, Margins::zero()));
        let spaced = compute_template(&input(35.0, 45.0, 5.0, Margins::zero()));
        // (210 + 5) / 40 = 5.375 -> 5 columns, (297 + 5) / 50 = 6.04 -> 6 rows
        assert_eq!(spaced.cols, 5);
        assert_eq!(spaced.rows, 6);
        assert!(spaced.len() < tight.len());
    }

    #[test]
    fn test_photo_larger_than_printable_area_is_empty() {
        let template = compute_template(&input(205.0, 100.0, 0.0, Margins::uniform(5.0)));
        assert!(template.is_empty());
        assert_eq!(template.cols, 0);

        let template = compute_template(&input(50.0, 290.0, 0.0, Margins::uniform(5.0)));
        assert!(template.is_empty());
    }

    #[test]
    fn test_margins_larger_than_page_are_empty() {
        let template = compute_template(&input(10.0, 10.0, 0.0, Margins::uniform(150.0)));
        assert!(template.is_empty());
    }

    #[test]
    fn test_exact_fit_within_tolerance() {
        // 7 columns of 30mm exactly fill 210mm
        let template = compute_template(&input(30.0, 297.0, 0.0, Margins::zero()));
        assert_eq!(template.len(), 7);
        let last = template.slots.last().unwrap();
        assert!((last.x_percent + last.width_percent - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_photo_paper_sizes() {
        let template = compute_template(&TemplateInput {
            paper: PaperSize::Photo4x6,
            photo: PhotoSize {
                width_mm: 50.0,
                height_mm: 50.0,
            },
            spacing_mm: 0.0,
            margins: Margins::zero(),
        });
        assert_eq!(template.cols, 2);
        assert_eq!(template.rows, 3);
    }
}
