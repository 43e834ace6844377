//! Mosaic adjacency resize
//!
//! Mosaic photos don't sit on a fixed grid, so adjacency is detected from
//! geometry: two photos share a vertical edge when one's right edge lies
//! within the tolerance of the other's left edge and their vertical extents
//! overlap. Horizontal edges are the symmetric case. Adjacency is never
//! stored; it is recomputed from whatever geometry is passed in.

use crate::constants::ADJACENCY_TOLERANCE_PERCENT;

use super::engine::{ResizeEngine, clamp_pair_delta, resizable_indices};
use super::{CollagePhoto, DragTarget, EdgeAxis, HandleId, PercentDelta, ResizeHandle};

/// Two photos that share an edge
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacentPair {
    pub axis: EdgeAxis,
    /// Index of the left (or upper) photo in the input slice
    pub first: usize,
    /// Index of the right (or lower) photo in the input slice
    pub second: usize,
}

fn ranges_overlap(a_start: f32, a_end: f32, b_start: f32, b_end: f32) -> bool {
    a_start < b_end && b_start < a_end
}

fn touches(edge: f32, other_edge: f32) -> bool {
    (edge - other_edge).abs() <= ADJACENCY_TOLERANCE_PERCENT
}

/// Classify how `a` and `b` touch, if at all.
///
/// Returns the axis and whether `a` is the first (left/upper) photo.
pub fn adjacency(a: &CollagePhoto, b: &CollagePhoto) -> Option<(EdgeAxis, bool)> {
    if ranges_overlap(a.y, a.bottom(), b.y, b.bottom()) {
        if touches(a.right(), b.x) {
            return Some((EdgeAxis::Vertical, true));
        }
        if touches(b.right(), a.x) {
            return Some((EdgeAxis::Vertical, false));
        }
    }
    if ranges_overlap(a.x, a.right(), b.x, b.right()) {
        if touches(a.bottom(), b.y) {
            return Some((EdgeAxis::Horizontal, true));
        }
        if touches(b.bottom(), a.y) {
            return Some((EdgeAxis::Horizontal, false));
        }
    }
    None
}

/// All adjacent pairs among the non-overlay photos
pub fn find_adjacent_pairs(photos: &[CollagePhoto]) -> Vec<AdjacentPair> {
    let indices = resizable_indices(photos);
    let mut pairs = Vec::new();

    for (n, &i) in indices.iter().enumerate() {
        for &j in &indices[n + 1..] {
            if let Some((axis, i_first)) = adjacency(&photos[i], &photos[j]) {
                let (first, second) = if i_first { (i, j) } else { (j, i) };
                pairs.push(AdjacentPair {
                    axis,
                    first,
                    second,
                });
            }
        }
    }

    pairs
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MosaicAdjacency;

impl ResizeEngine for MosaicAdjacency {
    fn handles(&self, photos: &[CollagePhoto]) -> Vec<ResizeHandle> {
        find_adjacent_pairs(photos)
            .into_iter()
            .map(|pair| {
                let a = &photos[pair.first];
                let b = &photos[pair.second];
                // Centre of the overlapping part of the shared edge
                let (x, y) = match pair.axis {
                    EdgeAxis::Vertical => {
                        let top = a.y.max(b.y);
                        let bottom = a.bottom().min(b.bottom());
                        (a.right(), (top + bottom) / 2.0)
                    }
                    EdgeAxis::Horizontal => {
                        let left = a.x.max(b.x);
                        let right = a.right().min(b.right());
                        ((left + right) / 2.0, a.bottom())
                    }
                };
                ResizeHandle {
                    id: HandleId::Shared {
                        axis: pair.axis,
                        first: a.id.clone(),
                        second: b.id.clone(),
                    },
                    axis: pair.axis,
                    first: a.id.clone(),
                    second: b.id.clone(),
                    x,
                    y,
                }
            })
            .collect()
    }

    fn apply(
        &self,
        snapshot: &[CollagePhoto],
        target: &DragTarget,
        delta: PercentDelta,
    ) -> Vec<CollagePhoto> {
        let mut photos = snapshot.to_vec();

        let DragTarget::Handle(HandleId::Shared {
            axis,
            first,
            second,
        }) = target
        else {
            return photos;
        };

        let find = |id: &str| snapshot.iter().position(|p| p.id == id && !p.is_overlay);
        let (Some(fi), Some(si)) = (find(first), find(second)) else {
            return photos;
        };

        // The dominant component of this move decides which axis is live
        let horizontal_motion = delta.dx.abs() >= delta.dy.abs();

        match (axis, horizontal_motion) {
            (EdgeAxis::Vertical, true) => {
                let dx = clamp_pair_delta(delta.dx, snapshot[fi].width, snapshot[si].width);
                photos[fi].width = snapshot[fi].width + dx;
                photos[si].x = snapshot[si].x + dx;
                photos[si].width = snapshot[si].width - dx;
            }
            (EdgeAxis::Horizontal, false) => {
                let dy = clamp_pair_delta(delta.dy, snapshot[fi].height, snapshot[si].height);
                photos[fi].height = snapshot[fi].height + dy;
                photos[si].y = snapshot[si].y + dy;
                photos[si].height = snapshot[si].height - dy;
            }
            _ => {}
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
    use crate::types::PercentRect;

    fn photo(id: &str, x: f32, y: f32, w: f32, h: f32) -> CollagePhoto {
        CollagePhoto::new(id, format!("{id}.jpg"), PercentRect::new(x, y, w, h))
    }

    #[test]
    fn test_exact_touch_is_vertical_adjacency() {
        let a = photo("a", 0.0, 0.0, 40.0, 50.0);
        let b = photo("b", 40.0, 20.0, 60.0, 50.0);
        assert_eq!(adjacency(&a, &b), Some((EdgeAxis::Vertical, true)));
        assert_eq!(adjacency(&b, &a), Some((EdgeAxis::Vertical, false)));
    }

    #[test]
    fn test_near_touch_within_tolerance() {
        let a = photo("a", 0.0, 0.0, 40.0, 50.0);
        let b = photo("b", 41.5, 0.0, 58.5, 50.0);
        assert_eq!(adjacency(&a, &b), Some((EdgeAxis::Vertical, true)));
    }

    #[test]
    fn test_horizontal_adjacency() {
        let a = photo("a", 10.0, 0.0, 50.0, 30.0);
        let b = photo("b", 0.0, 30.0, 100.0, 70.0);
        assert_eq!(adjacency(&a, &b), Some((EdgeAxis::Horizontal, true)));
    }

    #[test]
    fn test_no_shared_edge_produces_no_handle() {
        let a = photo("a", 0.0, 0.0, 30.0, 30.0);
        let b = photo("b", 50.0, 0.0, 30.0, 30.0);
        // Touching x but no vertical overlap
        let c = photo("c", 30.0, 60.0, 30.0, 30.0);
        let photos = vec![a, b, c];
        assert!(find_adjacent_pairs(&photos).is_empty());
        assert!(MosaicAdjacency.handles(&photos).is_empty());
    }

    #[test]
    fn test_handles_for_mosaic() {
        let photos = vec![
            photo("a", 0.0, 0.0, 50.0, 100.0),
            photo("b", 50.0, 0.0, 50.0, 40.0),
            photo("c", 50.0, 40.0, 50.0, 60.0),
        ];
        let handles = MosaicAdjacency.handles(&photos);
        assert_eq!(handles.len(), 3);

        let bc = handles
            .iter()
            .find(|h| h.first == "b" && h.second == "c")
            .unwrap();
        assert_eq!(bc.axis, EdgeAxis::Horizontal);
        assert_eq!(bc.y, 40.0);
        assert_eq!(bc.x, 75.0);
    }

    #[test]
    fn test_drag_preserves_pair_footprint() {
        let photos = vec![
            photo("a", 0.0, 0.0, 50.0, 100.0),
            photo("b", 50.0, 0.0, 50.0, 100.0),
        ];
        let target = DragTarget::Handle(HandleId::Shared {
            axis: EdgeAxis::Vertical,
            first: "a".to_string(),
            second: "b".to_string(),
        });

        let after = MosaicAdjacency.apply(&photos, &target, PercentDelta { dx: -8.0, dy: 2.0 });
        assert_eq!(after[0].width, 42.0);
        assert_eq!(after[1].x, 42.0);
        assert_eq!(after[1].width, 58.0);
        assert_eq!(after[1].right(), photos[1].right());
    }

    #[test]
    fn test_off_axis_motion_is_ignored() {
        let photos = vec![
            photo("a", 0.0, 0.0, 50.0, 100.0),
            photo("b", 50.0, 0.0, 50.0, 100.0),
        ];
        let target = DragTarget::Handle(HandleId::Shared {
            axis: EdgeAxis::Vertical,
            first: "a".to_string(),
            second: "b".to_string(),
        });
        let after = MosaicAdjacency.apply(&photos, &target, PercentDelta { dx: 1.0, dy: 9.0 });
        assert_eq!(after, photos);
    }

    #[test]
    fn test_overlays_never_pair() {
        let photos = vec![
            photo("a", 0.0, 0.0, 50.0, 100.0),
            photo("frame", 50.0, 0.0, 50.0, 100.0).overlay(),
        ];
        assert!(find_adjacent_pairs(&photos).is_empty());
    }
}
