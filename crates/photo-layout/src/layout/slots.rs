//! Slot swaps and direct placement
//!
//! These are the only mutations allowed on a built sheet set. They move
//! image references around and never touch slot geometry, slot count or
//! sheet count. Empty slots take part like any other slot.

use super::{Sheet, SheetSet};

/// Exchange the images of two slots on the same sheet.
///
/// Indices are positions within the sheet. Returns `false` (and changes
/// nothing) when the indices are equal or either one doesn't exist.
pub fn swap_slots(
    sheets: &mut SheetSet,
    sheet_index: usize,
    index_a: usize,
    index_b: usize,
) -> bool {
    if index_a == index_b {
        return false;
    }
    let Some(sheet) = sheets.get_mut(sheet_index) else {
        return false;
    };
    if index_a >= sheet.photos.len() || index_b >= sheet.photos.len() {
        return false;
    }

    let (low, high) = if index_a < index_b {
        (index_a, index_b)
    } else {
        (index_b, index_a)
    };
    let (head, tail) = sheet.photos.split_at_mut(high);
    std::mem::swap(&mut head[low].image_source, &mut tail[0].image_source);
    true
}

/// Put `image` into the slot whose id is `slot_id` on `sheet`.
///
/// `None` clears the slot. Returns `false` when no slot has that id.
pub fn place_image(sheet: &mut Sheet, image: Option<String>, slot_id: usize) -> bool {
    match sheet.photos.iter_mut().find(|p| p.slot.id == slot_id) {
        Some(photo) => {
            photo.image_source = image;
            true
        }
        None => false,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PageTemplate, PageTemplateSlot, paginate};

    fn sheets() -> SheetSet {
        let template = PageTemplate {
            cols: 2,
            rows: 2,
            slots: (0..4)
                .map(|id| PageTemplateSlot {
                    id,
                    x_percent: (id % 2) as f32 * 50.0,
                    y_percent: (id / 2) as f32 * 50.0,
                    width_percent: 50.0,
                    height_percent: 50.0,
                })
                .collect(),
        };
        let images = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        paginate(&images, 1, &template)
    }

    #[test]
    fn test_swap_exchanges_only_images() {
        let mut set = sheets();
        let before = set.clone();

        assert!(swap_slots(&mut set, 0, 0, 2));
        assert_eq!(set[0].photos[0].image_source.as_deref(), Some("C"));
        assert_eq!(set[0].photos[2].image_source.as_deref(), Some("A"));
        for (a, b) in set[0].photos.iter().zip(&before[0].photos) {
            assert_eq!(a.slot, b.slot);
        }
    }

    #[test]
    fn test_swap_is_self_inverse() {
        let mut set = sheets();
        let before = set.clone();
        swap_slots(&mut set, 0, 1, 3);
        swap_slots(&mut set, 0, 1, 3);
        assert_eq!(set, before);
    }

    #[test]
    fn test_swap_with_empty_slot_moves_emptiness() {
        let mut set = sheets();
        assert!(swap_slots(&mut set, 0, 3, 0));
        assert!(set[0].photos[0].image_source.is_none());
        assert_eq!(set[0].photos[3].image_source.as_deref(), Some("A"));
    }

    #[test]
    fn test_swap_invalid_is_noop() {
        let mut set = sheets();
        let before = set.clone();
        assert!(!swap_slots(&mut set, 0, 1, 1));
        assert!(!swap_slots(&mut set, 0, 1, 9));
        assert!(!swap_slots(&mut set, 5, 0, 1));
        assert_eq!(set, before);
    }

    #[test]
    fn test_place_image_by_slot_id() {
        let mut set = sheets();
        assert!(place_image(&mut set[0], Some("Z".to_string()), 3));
        assert_eq!(set[0].photos[3].image_source.as_deref(), Some("Z"));
        assert_eq!(set[0].photos.len(), 4);

        assert!(place_image(&mut set[0], None, 0));
        assert!(set[0].photos[0].is_empty());

        assert!(!place_image(&mut set[0], Some("Z".to_string()), 42));
    }
}
