//! Collage data types
//!
//! Collage photos carry their own geometry (percent of page) plus the user's
//! transforms. Resize engines and the drag protocol speak in terms of the
//! handle and target types defined here.

use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_SCALE, MIN_SCALE};
use crate::types::{LayoutError, PercentRect};

/// Pixel pan offset applied inside the photo frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanOffset {
    pub x: f32,
    pub y: f32,
}

/// Clip shape for a photo frame
///
/// `path_data` uses object-bounding-box units (0..1) and polygon commands
/// only: `M x,y L x,y ... Z`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipPath {
    pub id: String,
    pub path_data: String,
}

impl ClipPath {
    pub fn new(id: impl Into<String>, path_data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path_data: path_data.into(),
        }
    }

    /// Build a closed polygon path from bounding-box points
    pub fn from_polygon(id: impl Into<String>, points: &[(f32, f32)]) -> Self {
        let mut data = String::new();
        for (i, (x, y)) in points.iter().enumerate() {
            let cmd = if i == 0 { "M" } else { "L" };
            if i > 0 {
                data.push(' ');
            }
            data.push_str(&format!("{cmd} {x:.4},{y:.4}"));
        }
        data.push_str(" Z");
        Self::new(id, data)
    }

    /// Parse the path into polygon vertices.
    ///
    /// Returns `None` for anything other than `M`/`L`/`Z` commands or when
    /// fewer than three points are present.
    pub fn polygon(&self) -> Option<Vec<(f32, f32)>> {
        let mut points = Vec::new();
        let mut numbers = Vec::new();
        let tokens = self
            .path_data
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty());

        for token in tokens {
            match token {
                "M" | "L" | "m" | "l" => {}
                "Z" | "z" => break,
                _ => numbers.push(token.parse::<f32>().ok()?),
            }
            if numbers.len() == 2 {
                points.push((numbers[0], numbers[1]));
                numbers.clear();
            }
        }

        if !numbers.is_empty() || points.len() < 3 {
            return None;
        }
        Some(points)
    }
}

/// A freely transformable photo in a collage
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollagePhoto {
    pub id: String,
    /// Left edge, percent of page width
    pub x: f32,
    /// Top edge, percent of page height
    pub y: f32,
    /// Width, percent of page width (always positive)
    pub width: f32,
    /// Height, percent of page height (always positive)
    pub height: f32,
    /// Clockwise rotation, one of 0, 90, 180, 270
    pub rotation: u16,
    /// Zoom factor inside the frame, kept within [MIN_SCALE, MAX_SCALE]
    pub scale: f32,
    /// Pan offset in display pixels
    pub position: PanOffset,
    /// Horizontal mirror: 1 or -1
    pub scale_x: i8,
    pub z_index: i32,
    pub src: String,
    /// Frames and decorations; never dragged, resized or reordered
    pub is_overlay: bool,
    pub clip_path: Option<ClipPath>,
}

impl CollagePhoto {
    pub fn new(id: impl Into<String>, src: impl Into<String>, rect: PercentRect) -> Self {
        Self {
            id: id.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            rotation: 0,
            scale: 1.0,
            position: PanOffset::default(),
            scale_x: 1,
            z_index: 0,
            src: src.into(),
            is_overlay: false,
            clip_path: None,
        }
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_clip_path(mut self, clip_path: ClipPath) -> Self {
        self.clip_path = Some(clip_path);
        self
    }

    pub fn overlay(mut self) -> Self {
        self.is_overlay = true;
        self
    }

    pub fn rect(&self) -> PercentRect {
        PercentRect::new(self.x, self.y, self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_mirrored(&self) -> bool {
        self.scale_x < 0
    }

    /// Check the per-photo invariants
    pub fn validate(&self) -> crate::types::Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LayoutError::Config(format!(
                "Photo {} must have a positive size",
                self.id
            )));
        }
        if !(MIN_SCALE..=MAX_SCALE).contains(&self.scale) {
            return Err(LayoutError::Config(format!(
                "Photo {} scale {} is outside [{MIN_SCALE}, {MAX_SCALE}]",
                self.id, self.scale
            )));
        }
        if self.rotation % 90 != 0 || self.rotation >= 360 {
            return Err(LayoutError::Config(format!(
                "Photo {} rotation {} is not a quarter turn",
                self.id, self.rotation
            )));
        }
        if self.scale_x != 1 && self.scale_x != -1 {
            return Err(LayoutError::Config(format!(
                "Photo {} mirror flag must be 1 or -1",
                self.id
            )));
        }
        Ok(())
    }
}

/// Orientation of the edge two photos share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeAxis {
    /// Side-by-side photos; dragging changes widths
    Vertical,
    /// Stacked photos; dragging changes heights
    Horizontal,
}

/// Identifies a resize handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HandleId {
    /// Grid handle between two columns, numbered `row * (cols - 1) + col`
    Vertical(usize),
    /// Grid handle between two rows, numbered by the upper photo's index
    Horizontal(usize),
    /// Handle on the edge shared by two mosaic photos
    Shared {
        axis: EdgeAxis,
        first: String,
        second: String,
    },
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleId::Vertical(n) => write!(f, "v-{n}"),
            HandleId::Horizontal(n) => write!(f, "h-{n}"),
            HandleId::Shared {
                axis: EdgeAxis::Vertical,
                first,
                second,
            } => write!(f, "mv:{first}:{second}"),
            HandleId::Shared {
                axis: EdgeAxis::Horizontal,
                first,
                second,
            } => write!(f, "mh:{first}:{second}"),
        }
    }
}

impl FromStr for HandleId {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LayoutError::Config(format!("Invalid handle id: {s}"));

        if let Some(n) = s.strip_prefix("v-") {
            return n.parse().map(HandleId::Vertical).map_err(|_| invalid());
        }
        if let Some(n) = s.strip_prefix("h-") {
            return n.parse().map(HandleId::Horizontal).map_err(|_| invalid());
        }

        let mut parts = s.splitn(3, ':');
        let axis = match parts.next() {
            Some("mv") => EdgeAxis::Vertical,
            Some("mh") => EdgeAxis::Horizontal,
            _ => return Err(invalid()),
        };
        match (parts.next(), parts.next()) {
            (Some(first), Some(second)) if !first.is_empty() && !second.is_empty() => {
                Ok(HandleId::Shared {
                    axis,
                    first: first.to_string(),
                    second: second.to_string(),
                })
            }
            _ => Err(invalid()),
        }
    }
}

/// A draggable handle on the edge between two photos
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeHandle {
    pub id: HandleId,
    pub axis: EdgeAxis,
    /// Left (or upper) photo
    pub first: String,
    /// Right (or lower) photo
    pub second: String,
    /// Centre of the shared edge, percent of page
    pub x: f32,
    pub y: f32,
}

/// What a pointer drag is acting on
#[derive(Debug, Clone, PartialEq)]
pub enum DragTarget {
    Handle(HandleId),
    /// Moving a whole photo (freeform layouts)
    Photo(String),
}

/// Pointer movement expressed in percent of the collage container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PercentDelta {
    pub dx: f32,
    pub dy: f32,
}

impl PercentDelta {
    /// Convert a pixel delta using the container size in pixels.
    ///
    /// A zero-sized container yields no movement.
    pub fn from_pixels(dx: f32, dy: f32, parent_width: f32, parent_height: f32) -> Self {
        let to_percent = |d: f32, size: f32| if size > 0.0 { d / size * 100.0 } else { 0.0 };
        Self {
            dx: to_percent(dx, parent_width),
            dy: to_percent(dy, parent_height),
        }
    }
}
