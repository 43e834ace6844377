//! Free dragging for freeform layouts
//!
//! There are no paired handles; the user grabs a whole photo and moves it.

use super::engine::ResizeEngine;
use super::{CollagePhoto, DragTarget, PercentDelta, ResizeHandle};

#[derive(Debug, Clone, Copy, Default)]
pub struct FreeDrag;

/// Clamp a leading edge so a span of `size` stays on a 0..100 axis
fn keep_on_page(start: f32, size: f32) -> f32 {
    let limit = 100.0 - size;
    let (low, high) = if limit >= 0.0 { (0.0, limit) } else { (limit, 0.0) };
    start.clamp(low, high)
}

impl ResizeEngine for FreeDrag {
    fn handles(&self, _photos: &[CollagePhoto]) -> Vec<ResizeHandle> {
        Vec::new()
    }

    fn apply(
        &self,
        snapshot: &[CollagePhoto],
        target: &DragTarget,
        delta: PercentDelta,
    ) -> Vec<CollagePhoto> {
        let mut photos = snapshot.to_vec();
        let DragTarget::Photo(id) = target else {
            return photos;
        };

        if let Some(photo) = photos.iter_mut().find(|p| &p.id == id && !p.is_overlay) {
            photo.x = keep_on_page(photo.x + delta.dx, photo.width);
            photo.y = keep_on_page(photo.y + delta.dy, photo.height);
        }
        photos
    }
}
