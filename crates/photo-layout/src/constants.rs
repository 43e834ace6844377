//! Shared constants for sheet and collage layout
//!
//! This module centralizes magic numbers used throughout the layout
//! engine and by the renderers downstream.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Centimetres to inches
pub const CM_TO_IN: f32 = 0.393701;

/// Inches to centimetres
pub const IN_TO_CM: f32 = 2.54;

/// Millimetres per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Millimetres per centimetre
pub const MM_PER_CM: f32 = 10.0;

// =============================================================================
// Page Geometry
// =============================================================================

/// Slack allowed when testing whether a slot fits the printable area (mm).
/// Absorbs floating-point error from the column/row arithmetic.
pub const SLOT_FIT_TOLERANCE_MM: f32 = 0.1;

/// Default spacing between photos (mm)
pub const DEFAULT_SPACING_MM: f32 = 2.0;

// =============================================================================
// Images
// =============================================================================

/// Maximum number of images accepted into one session
pub const MAX_IMAGES: usize = 100;

/// Maximum copies of each image on a sheet run
pub const MAX_COPIES: usize = 1000;

/// Minimum number of images a collage needs
pub const MIN_COLLAGE_IMAGES: usize = 2;

// =============================================================================
// Collage
// =============================================================================

/// Edge distance (percent of page) under which two mosaic photos count as touching
pub const ADJACENCY_TOLERANCE_PERCENT: f32 = 2.0;

/// Smallest width or height a paired resize may leave a photo with (percent)
pub const MIN_PHOTO_PERCENT: f32 = 5.0;

/// Lower bound for photo zoom
pub const MIN_SCALE: f32 = 0.5;

/// Upper bound for photo zoom
pub const MAX_SCALE: f32 = 5.0;

/// Rotation step applied by a single rotate operation (degrees)
pub const ROTATION_STEP_DEGREES: u16 = 90;

// =============================================================================
// Export
// =============================================================================

/// Resolution of the export canvas
pub const EXPORT_DPI: f32 = 300.0;

/// Highest export resolution accepted; an A3 canvas at this DPI is ~270 MP
pub const MAX_EXPORT_DPI: f32 = 1200.0;
