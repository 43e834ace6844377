//! Per-photo transforms: rotate, mirror, zoom, pan

use crate::constants::{MAX_SCALE, MIN_SCALE, ROTATION_STEP_DEGREES};

use super::{CollagePhoto, PanOffset};

/// Clamp a zoom factor into the supported range. NaN maps to the minimum.
pub fn clamp_scale(value: f32) -> f32 {
    if value.is_nan() {
        return MIN_SCALE;
    }
    value.clamp(MIN_SCALE, MAX_SCALE)
}

impl CollagePhoto {
    /// Quarter turn clockwise
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + ROTATION_STEP_DEGREES) % 360;
    }

    /// Toggle the horizontal mirror
    pub fn mirror(&mut self) {
        self.scale_x = -self.scale_x;
    }

    pub fn set_scale(&mut self, value: f32) {
        self.scale = clamp_scale(value);
    }

    /// Take rotation, mirror, zoom and pan from `other`. Geometry and clip
    /// stay with this photo's layout.
    pub fn copy_transform_from(&mut self, other: &CollagePhoto) {
        self.rotation = other.rotation;
        self.scale_x = other.scale_x;
        self.scale = clamp_scale(other.scale);
        self.position = other.position;
    }

    /// Take position and size from `other`, leaving everything else alone
    pub fn copy_geometry_from(&mut self, other: &CollagePhoto) {
        self.x = other.x;
        self.y = other.y;
        self.width = other.width;
        self.height = other.height;
    }
}

/// Two-finger pinch, measured from the distance when the gesture began
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchGesture {
    start_distance: f32,
    start_scale: f32,
}

impl PinchGesture {
    pub fn begin(start_distance: f32, start_scale: f32) -> Self {
        Self {
            start_distance,
            start_scale,
        }
    }

    /// Scale for the current finger distance
    pub fn scale_for(&self, distance: f32) -> f32 {
        if !(self.start_distance > 0.0) {
            return clamp_scale(self.start_scale);
        }
        clamp_scale(self.start_scale * distance / self.start_distance)
    }
}

/// Crop/pan mode for one photo.
///
/// Offsets accumulate here and reach the photo only on commit.
#[derive(Debug, Clone, PartialEq)]
pub struct PanSession {
    photo_id: String,
    offset: PanOffset,
}

impl PanSession {
    pub fn begin(photo: &CollagePhoto) -> Self {
        Self {
            photo_id: photo.id.clone(),
            offset: photo.position,
        }
    }

    pub fn photo_id(&self) -> &str {
        &self.photo_id
    }

    pub fn offset(&self) -> PanOffset {
        self.offset
    }

    /// Accumulate a pixel movement
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Bake the accumulated offset into the photo
    pub fn commit(self, photo: &mut CollagePhoto) {
        debug_assert_eq!(photo.id, self.photo_id);
        photo.position = self.offset;
    }
}
