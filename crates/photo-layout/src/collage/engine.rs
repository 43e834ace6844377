//! Resize engine interface
//!
//! Each collage layout picks exactly one engine. Engines are pure: they read
//! the drag-start snapshot and return the photo list as it should look for
//! the given cumulative pointer delta.

use crate::constants::MIN_PHOTO_PERCENT;

use super::{CollagePhoto, DragTarget, PercentDelta, ResizeHandle};

pub trait ResizeEngine {
    /// Handles available for the current geometry
    fn handles(&self, photos: &[CollagePhoto]) -> Vec<ResizeHandle>;

    /// Geometry after dragging `target` by `delta` from `snapshot`
    fn apply(
        &self,
        snapshot: &[CollagePhoto],
        target: &DragTarget,
        delta: PercentDelta,
    ) -> Vec<CollagePhoto>;
}

/// Engine for layouts whose geometry is not user adjustable
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLayout;

impl ResizeEngine for FixedLayout {
    fn handles(&self, _photos: &[CollagePhoto]) -> Vec<ResizeHandle> {
        Vec::new()
    }

    fn apply(
        &self,
        snapshot: &[CollagePhoto],
        _target: &DragTarget,
        _delta: PercentDelta,
    ) -> Vec<CollagePhoto> {
        snapshot.to_vec()
    }
}

/// Clamp a paired-resize delta so that neither side shrinks below the
/// minimum photo size.
///
/// `grow` is the dimension that increases with a positive delta, `shrink`
/// the one that decreases. Returns 0 when the pair is already too small to
/// move at all.
pub(crate) fn clamp_pair_delta(delta: f32, grow: f32, shrink: f32) -> f32 {
    let lower = MIN_PHOTO_PERCENT - grow;
    let upper = shrink - MIN_PHOTO_PERCENT;
    if lower > upper {
        return 0.0;
    }
    delta.clamp(lower, upper)
}

/// Indices into `photos` of the photos that take part in resizing
pub(crate) fn resizable_indices(photos: &[CollagePhoto]) -> Vec<usize> {
    photos
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_overlay)
        .map(|(i, _)| i)
        .collect()
}
