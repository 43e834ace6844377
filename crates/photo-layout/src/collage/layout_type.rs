//! Collage layout variants
//!
//! The layout decides two things: where photos start out, and which resize
//! engine handles pointer drags. Both are chosen by a single match on the
//! variant.

use std::f32::consts::PI;

use crate::types::PercentRect;

use super::engine::{FixedLayout, ResizeEngine};
use super::free_drag::FreeDrag;
use super::grid_resize::GridAdjacency;
use super::mosaic_resize::MosaicAdjacency;
use super::{ClipPath, CollagePhoto};

/// Styles for layouts built around exactly two photos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TwoPhotoStyle {
    /// Side by side
    Split,
    /// One above the other
    Stacked,
    /// Two full-page photos cut along the diagonal
    Diagonal,
    /// Two heart-shaped frames
    Hearts,
    /// Two frames stacked like a film strip
    Film,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollageLayoutType {
    Grid { cols: usize, rows: usize },
    Mosaic,
    Freeform,
    TwoPhoto(TwoPhotoStyle),
}

impl Default for CollageLayoutType {
    fn default() -> Self {
        CollageLayoutType::Grid { cols: 2, rows: 2 }
    }
}

/// Which engine a layout uses, without building it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    GridAdjacency { cols: usize },
    MosaicAdjacency,
    FreeDrag,
    Fixed,
}

impl CollageLayoutType {
    /// Smallest square-ish grid that holds `count` photos
    pub fn grid_for(count: usize) -> Self {
        let count = count.max(1);
        let cols = (count as f32).sqrt().ceil() as usize;
        let rows = count.div_ceil(cols);
        CollageLayoutType::Grid { cols, rows }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CollageLayoutType::Grid { .. } => "grid",
            CollageLayoutType::Mosaic => "mosaic",
            CollageLayoutType::Freeform => "freeform",
            CollageLayoutType::TwoPhoto(TwoPhotoStyle::Split) => "split",
            CollageLayoutType::TwoPhoto(TwoPhotoStyle::Stacked) => "stacked",
            CollageLayoutType::TwoPhoto(TwoPhotoStyle::Diagonal) => "diagonal",
            CollageLayoutType::TwoPhoto(TwoPhotoStyle::Hearts) => "hearts",
            CollageLayoutType::TwoPhoto(TwoPhotoStyle::Film) => "film",
        }
    }

    /// Number of photos the layout places; `None` means as many as given
    pub fn capacity(&self) -> Option<usize> {
        match self {
            CollageLayoutType::TwoPhoto(_) => Some(2),
            _ => None,
        }
    }

    pub fn engine_kind(&self) -> EngineKind {
        match self {
            CollageLayoutType::Grid { cols, .. } => EngineKind::GridAdjacency { cols: *cols },
            CollageLayoutType::TwoPhoto(TwoPhotoStyle::Split) => {
                EngineKind::GridAdjacency { cols: 2 }
            }
            CollageLayoutType::TwoPhoto(TwoPhotoStyle::Stacked) => {
                EngineKind::GridAdjacency { cols: 1 }
            }
            CollageLayoutType::Mosaic => EngineKind::MosaicAdjacency,
            CollageLayoutType::Freeform | CollageLayoutType::TwoPhoto(TwoPhotoStyle::Hearts) => {
                EngineKind::FreeDrag
            }
            CollageLayoutType::TwoPhoto(TwoPhotoStyle::Diagonal | TwoPhotoStyle::Film) => {
                EngineKind::Fixed
            }
        }
    }

    /// The resize engine that handles drags for this layout
    pub fn resize_engine(&self) -> Box<dyn ResizeEngine> {
        match self.engine_kind() {
            EngineKind::GridAdjacency { cols } => Box::new(GridAdjacency::new(cols)),
            EngineKind::MosaicAdjacency => Box::new(MosaicAdjacency),
            EngineKind::FreeDrag => Box::new(FreeDrag),
            EngineKind::Fixed => Box::new(FixedLayout),
        }
    }

    /// Default photo placement for `sources` under this layout
    pub fn arrange(&self, sources: &[String]) -> Vec<CollagePhoto> {
        let sources = match self.capacity() {
            Some(cap) if sources.len() > cap => {
                log::warn!(
                    "{} layout places {cap} photos, ignoring {} more",
                    self.name(),
                    sources.len() - cap
                );
                &sources[..cap]
            }
            _ => sources,
        };

        let rects: Vec<(PercentRect, Option<ClipPath>)> = match self {
            CollageLayoutType::Grid { cols, rows } => grid_rects(sources.len(), *cols, *rows)
                .into_iter()
                .map(|r| (r, None))
                .collect(),
            CollageLayoutType::Mosaic => {
                let mut rects = Vec::with_capacity(sources.len());
                mosaic_rects(
                    PercentRect::new(0.0, 0.0, 100.0, 100.0),
                    sources.len(),
                    &mut rects,
                );
                rects.into_iter().map(|r| (r, None)).collect()
            }
            CollageLayoutType::Freeform => (0..sources.len())
                .map(|i| (freeform_rect(i), None))
                .collect(),
            CollageLayoutType::TwoPhoto(style) => two_photo_rects(*style),
        };

        sources
            .iter()
            .zip(rects)
            .enumerate()
            .map(|(i, (src, (rect, clip)))| {
                let mut photo = CollagePhoto::new(format!("photo-{i}"), src.clone(), rect)
                    .with_z_index(i as i32 + 1);
                photo.clip_path = clip;
                photo
            })
            .collect()
    }
}

fn grid_rects(count: usize, cols: usize, rows: usize) -> Vec<PercentRect> {
    let cols = cols.max(1);
    let rows = rows.max(count.div_ceil(cols)).max(1);
    let width = 100.0 / cols as f32;
    let height = 100.0 / rows as f32;
    (0..count)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            PercentRect::new(col as f32 * width, row as f32 * height, width, height)
        })
        .collect()
}

/// Guillotine split: halve the photo count and cut the longer side in
/// proportion, recursing until every photo has a rectangle.
fn mosaic_rects(area: PercentRect, count: usize, out: &mut Vec<PercentRect>) {
    if count == 0 {
        return;
    }
    if count == 1 {
        out.push(area);
        return;
    }

    let first = count / 2;
    let ratio = first as f32 / count as f32;

    if area.width >= area.height {
        let left_width = area.width * ratio;
        mosaic_rects(
            PercentRect::new(area.x, area.y, left_width, area.height),
            first,
            out,
        );
        mosaic_rects(
            PercentRect::new(area.x + left_width, area.y, area.width - left_width, area.height),
            count - first,
            out,
        );
    } else {
        let top_height = area.height * ratio;
        mosaic_rects(
            PercentRect::new(area.x, area.y, area.width, top_height),
            first,
            out,
        );
        mosaic_rects(
            PercentRect::new(area.x, area.y + top_height, area.width, area.height - top_height),
            count - first,
            out,
        );
    }
}

fn freeform_rect(index: usize) -> PercentRect {
    let offset = (index % 7) as f32 * 8.0;
    PercentRect::new(5.0 + offset, 5.0 + offset, 40.0, 40.0)
}

fn two_photo_rects(style: TwoPhotoStyle) -> Vec<(PercentRect, Option<ClipPath>)> {
    match style {
        TwoPhotoStyle::Split => vec![
            (PercentRect::new(0.0, 0.0, 50.0, 100.0), None),
            (PercentRect::new(50.0, 0.0, 50.0, 100.0), None),
        ],
        TwoPhotoStyle::Stacked => vec![
            (PercentRect::new(0.0, 0.0, 100.0, 50.0), None),
            (PercentRect::new(0.0, 50.0, 100.0, 50.0), None),
        ],
        TwoPhotoStyle::Diagonal => {
            let full = PercentRect::new(0.0, 0.0, 100.0, 100.0);
            vec![
                (
                    full,
                    Some(ClipPath::new("diagonal-upper", "M 0,0 L 1,0 L 0,1 Z")),
                ),
                (
                    full,
                    Some(ClipPath::new("diagonal-lower", "M 1,0 L 1,1 L 0,1 Z")),
                ),
            ]
        }
        TwoPhotoStyle::Hearts => vec![
            (
                PercentRect::new(4.0, 30.0, 44.0, 40.0),
                Some(heart_clip("heart-left")),
            ),
            (
                PercentRect::new(52.0, 30.0, 44.0, 40.0),
                Some(heart_clip("heart-right")),
            ),
        ],
        TwoPhotoStyle::Film => vec![
            (PercentRect::new(10.0, 6.0, 80.0, 42.0), None),
            (PercentRect::new(10.0, 52.0, 80.0, 42.0), None),
        ],
    }
}

/// Heart outline sampled from the classic parametric curve, normalised to
/// the unit box
fn heart_clip(id: &str) -> ClipPath {
    const SAMPLES: usize = 48;
    let raw: Vec<(f32, f32)> = (0..SAMPLES)
        .map(|i| {
            let t = i as f32 / SAMPLES as f32 * 2.0 * PI;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos()
                - 5.0 * (2.0 * t).cos()
                - 2.0 * (3.0 * t).cos()
                - (4.0 * t).cos();
            (x, -y)
        })
        .collect();

    let (min_x, max_x) = raw
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.0), hi.max(p.0)));
    let (min_y, max_y) = raw
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));

    let points: Vec<(f32, f32)> = raw
        .iter()
        .map(|(x, y)| ((x - min_x) / (max_x - min_x), (y - min_y) / (max_y - min_y)))
        .collect();
    ClipPath::from_polygon(id, &points)
}

// =============================================================================
// Tests
// =============================================================================
