//! Z-order for collage photos
//!
//! Only non-overlay photos are reordered. Overlays keep whatever z-index
//! they were given.

use super::CollagePhoto;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Indices of the non-overlay photos, back to front.
///
/// Ties in z-index fall back to list order.
fn stacking_order(photos: &[CollagePhoto]) -> Vec<usize> {
    let mut order: Vec<usize> = photos
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_overlay)
        .map(|(i, _)| i)
        .collect();
    order.sort_by_key(|&i| (photos[i].z_index, i));
    order
}

fn step(photos: &mut [CollagePhoto], id: &str, direction: Direction) -> bool {
    let mut order = stacking_order(photos);
    let Some(pos) = order.iter().position(|&i| photos[i].id == id) else {
        return false;
    };

    let neighbour = match direction {
        Direction::Forward if pos + 1 < order.len() => pos + 1,
        Direction::Backward if pos > 0 => pos - 1,
        _ => return false,
    };
    order.swap(pos, neighbour);

    // Renumber densely from the old minimum so ties can't hide the swap
    let base = order
        .iter()
        .map(|&i| photos[i].z_index)
        .min()
        .unwrap_or(0);
    for (rank, &i) in order.iter().enumerate() {
        photos[i].z_index = base + rank as i32;
    }
    true
}

/// Move a photo one step toward the viewer. Returns `false` when it is
/// already in front, is an overlay, or doesn't exist.
pub fn bring_forward(photos: &mut [CollagePhoto], id: &str) -> bool {
    step(photos, id, Direction::Forward)
}

/// Move a photo one step away from the viewer
pub fn send_backward(photos: &mut [CollagePhoto], id: &str) -> bool {
    step(photos, id, Direction::Backward)
}
