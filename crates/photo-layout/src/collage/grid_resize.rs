//! Grid adjacency resize
//!
//! For row/column collages. Photos are addressed by their index among the
//! non-overlay photos, row-major. A vertical handle sits between
//! `row * cols + col` and the photo to its right; a horizontal handle sits
//! between `row * cols + col` and the photo `cols` positions later.

use super::engine::{ResizeEngine, clamp_pair_delta, resizable_indices};
use super::{CollagePhoto, DragTarget, EdgeAxis, HandleId, PercentDelta, ResizeHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridAdjacency {
    cols: usize,
}

impl GridAdjacency {
    pub fn new(cols: usize) -> Self {
        Self { cols: cols.max(1) }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (left, right) positions among resizable photos for a vertical handle
    fn vertical_pair(&self, handle: usize) -> Option<(usize, usize)> {
        if self.cols < 2 {
            return None;
        }
        let row = handle / (self.cols - 1);
        let col = handle % (self.cols - 1);
        let left = row * self.cols + col;
        Some((left, left + 1))
    }

    /// (top, bottom) positions among resizable photos for a horizontal handle
    fn horizontal_pair(&self, handle: usize) -> (usize, usize) {
        (handle, handle + self.cols)
    }
}

impl ResizeEngine for GridAdjacency {
    fn handles(&self, photos: &[CollagePhoto]) -> Vec<ResizeHandle> {
        let indices = resizable_indices(photos);
        let count = indices.len();
        let rows = count.div_ceil(self.cols);
        let mut handles = Vec::new();

        for row in 0..rows {
            for col in 0..self.cols.saturating_sub(1) {
                let left = row * self.cols + col;
                let right = left + 1;
                if right >= count {
                    continue;
                }
                let (a, b) = (&photos[indices[left]], &photos[indices[right]]);
                handles.push(ResizeHandle {
                    id: HandleId::Vertical(row * (self.cols - 1) + col),
                    axis: EdgeAxis::Vertical,
                    first: a.id.clone(),
                    second: b.id.clone(),
                    x: a.right(),
                    y: a.y + a.height / 2.0,
                });
            }
        }

        for row in 0..rows.saturating_sub(1) {
            for col in 0..self.cols {
                let top = row * self.cols + col;
                let bottom = top + self.cols;
                if bottom >= count {
                    continue;
                }
                let (a, b) = (&photos[indices[top]], &photos[indices[bottom]]);
                handles.push(ResizeHandle {
                    id: HandleId::Horizontal(top),
                    axis: EdgeAxis::Horizontal,
                    first: a.id.clone(),
                    second: b.id.clone(),
                    x: a.x + a.width / 2.0,
                    y: a.bottom(),
                });
            }
        }

        handles
    }

    fn apply(
        &self,
        snapshot: &[CollagePhoto],
        target: &DragTarget,
        delta: PercentDelta,
    ) -> Vec<CollagePhoto> {
        let mut photos = snapshot.to_vec();
        let indices = resizable_indices(snapshot);

        let DragTarget::Handle(handle) = target else {
            return photos;
        };

        match handle {
            HandleId::Vertical(n) => {
                let Some((left, right)) = self.vertical_pair(*n) else {
                    return photos;
                };
                let (Some(&li), Some(&ri)) = (indices.get(left), indices.get(right)) else {
                    return photos;
                };
                let dx = clamp_pair_delta(delta.dx, snapshot[li].width, snapshot[ri].width);
                photos[li].width = snapshot[li].width + dx;
                photos[ri].x = snapshot[ri].x + dx;
                photos[ri].width = snapshot[ri].width - dx;
            }
            HandleId::Horizontal(n) => {
                let (top, bottom) = self.horizontal_pair(*n);
                let (Some(&ti), Some(&bi)) = (indices.get(top), indices.get(bottom)) else {
                    return photos;
                };
                let dy = clamp_pair_delta(delta.dy, snapshot[ti].height, snapshot[bi].height);
                photos[ti].height = snapshot[ti].height + dy;
                photos[bi].y = snapshot[bi].y + dy;
                photos[bi].height = snapshot[bi].height - dy;
            }
            HandleId::Shared { .. } => {}
        }

        photos
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collage::CollageLayoutType;

    fn grid(cols: usize, rows: usize) -> Vec<CollagePhoto> {
        let sources: Vec<String> = (0..cols * rows).map(|i| format!("img{i}")).collect();
        CollageLayoutType::Grid { cols, rows }.arrange(&sources)
    }

    #[test]
    fn test_handle_ids() {
        let photos = grid(3, 2);
        let handles = GridAdjacency::new(3).handles(&photos);

        let ids: Vec<String> = handles.iter().map(|h| h.id.to_string()).collect();
        assert_eq!(ids, vec!["v-0", "v-1", "v-2", "v-3", "h-0", "h-1", "h-2"]);

        // v-3 is row 1, col 1: between photo 4 and 5
        assert_eq!(handles[3].first, photos[4].id);
        assert_eq!(handles[3].second, photos[5].id);
    }

    #[test]
    fn test_vertical_drag_preserves_combined_width() {
        let photos = grid(2, 2);
        let engine = GridAdjacency::new(2);
        let before = photos[0].width + photos[1].width;

        let after = engine.apply(
            &photos,
            &DragTarget::Handle(HandleId::Vertical(0)),
            PercentDelta { dx: 12.5, dy: 3.0 },
        );

        assert!((after[0].width - (photos[0].width + 12.5)).abs() < 1e-4);
        assert!((after[1].x - (photos[1].x + 12.5)).abs() < 1e-4);
        assert!((after[0].width + after[1].width - before).abs() < 1e-4);
        // Other rows and the vertical axis are untouched
        assert_eq!(after[2], photos[2]);
        assert_eq!(after[0].height, photos[0].height);
    }

    #[test]
    fn test_horizontal_drag_preserves_combined_height() {
        let photos = grid(2, 2);
        let after = GridAdjacency::new(2).apply(
            &photos,
            &DragTarget::Handle(HandleId::Horizontal(1)),
            PercentDelta { dx: 0.0, dy: -10.0 },
        );

        assert!((after[1].height - 40.0).abs() < 1e-4);
        assert!((after[3].y - 40.0).abs() < 1e-4);
        assert!((after[1].height + after[3].height - 100.0).abs() < 1e-4);
        assert_eq!(after[0], photos[0]);
    }

    #[test]
    fn test_large_drag_is_clamped() {
        let photos = grid(2, 1);
        let after = GridAdjacency::new(2).apply(
            &photos,
            &DragTarget::Handle(HandleId::Vertical(0)),
            PercentDelta { dx: 500.0, dy: 0.0 },
        );
        assert!((after[1].width - crate::constants::MIN_PHOTO_PERCENT).abs() < 1e-4);
        assert!((after[0].width + after[1].width - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_handle_is_noop() {
        let photos = grid(2, 1);
        let engine = GridAdjacency::new(2);
        let delta = PercentDelta { dx: 5.0, dy: 5.0 };
        assert_eq!(
            engine.apply(&photos, &DragTarget::Handle(HandleId::Vertical(9)), delta),
            photos
        );
        assert_eq!(
            engine.apply(&photos, &DragTarget::Handle(HandleId::Horizontal(0)), delta),
            photos
        );
        assert_eq!(
            engine.apply(&photos, &DragTarget::Photo(photos[0].id.clone()), delta),
            photos
        );
    }

    #[test]
    fn test_overlays_are_skipped() {
        let mut photos = grid(2, 1);
        photos.insert(
            0,
            CollagePhoto::new(
                "frame",
                "frame.png",
                crate::types::PercentRect::new(0.0, 0.0, 100.0, 100.0),
            )
            .overlay(),
        );
        let handles = GridAdjacency::new(2).handles(&photos);
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].first, photos[1].id);

        let after = GridAdjacency::new(2).apply(
            &photos,
            &DragTarget::Handle(HandleId::Vertical(0)),
            PercentDelta { dx: 10.0, dy: 0.0 },
        );
        assert_eq!(after[0], photos[0]);
        assert!((after[1].width - 60.0).abs() < 1e-4);
    }
}
