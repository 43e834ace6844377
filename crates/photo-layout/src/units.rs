//! Display units and conversions
//!
//! Geometry is always computed in millimetres. Users enter and read sizes in
//! centimetres or inches; these helpers translate at the edges.

use crate::constants::{CM_TO_IN, IN_TO_CM, MM_PER_CM, MM_PER_INCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhysicalUnit {
    #[default]
    Centimeter,
    Inch,
}

impl PhysicalUnit {
    pub fn name(self) -> &'static str {
        match self {
            PhysicalUnit::Centimeter => "cm",
            PhysicalUnit::Inch => "in",
        }
    }

    /// Convert a value in this unit to millimetres
    pub fn to_mm(self, value: f32) -> f32 {
        match self {
            PhysicalUnit::Centimeter => value * MM_PER_CM,
            PhysicalUnit::Inch => value * MM_PER_INCH,
        }
    }

    /// Convert millimetres to this unit
    pub fn from_mm(self, mm: f32) -> f32 {
        match self {
            PhysicalUnit::Centimeter => mm / MM_PER_CM,
            PhysicalUnit::Inch => mm / MM_PER_INCH,
        }
    }

    /// Convert a displayed value from this unit into `target`
    pub fn convert(self, value: f32, target: PhysicalUnit) -> f32 {
        match (self, target) {
            (PhysicalUnit::Centimeter, PhysicalUnit::Inch) => cm_to_in(value),
            (PhysicalUnit::Inch, PhysicalUnit::Centimeter) => in_to_cm(value),
            _ => value,
        }
    }
}

#[inline]
pub fn cm_to_in(cm: f32) -> f32 {
    cm * CM_TO_IN
}

#[inline]
pub fn in_to_cm(inches: f32) -> f32 {
    inches * IN_TO_CM
}

/// Pixels covered by `mm` at the given resolution
#[inline]
pub fn mm_to_px(mm: f32, dpi: f32) -> f32 {
    mm / MM_PER_INCH * dpi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_inch_round_trip() {
        let back = in_to_cm(cm_to_in(3.5));
        assert!((back - 3.5).abs() < 1e-4);
    }

    #[test]
    fn test_to_mm() {
        assert_eq!(PhysicalUnit::Centimeter.to_mm(3.5), 35.0);
        assert!((PhysicalUnit::Inch.to_mm(4.0) - 101.6).abs() < 1e-4);
        assert!((PhysicalUnit::Inch.from_mm(152.4) - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_convert_same_unit_is_identity() {
        assert_eq!(PhysicalUnit::Inch.convert(2.0, PhysicalUnit::Inch), 2.0);
        assert!((PhysicalUnit::Inch.convert(1.0, PhysicalUnit::Centimeter) - 2.54).abs() < 1e-6);
    }

    #[test]
    fn test_a4_width_at_300_dpi() {
        assert_eq!(mm_to_px(210.0, 300.0).round(), 2480.0);
        assert_eq!(mm_to_px(297.0, 300.0).round(), 3508.0);
    }
}
