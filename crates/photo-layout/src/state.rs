use crate::collage::{CollageLayoutType, CollagePhoto};
use crate::constants::{DEFAULT_SPACING_MM, MAX_COPIES, MAX_IMAGES};
use crate::layout::{SheetSet, TemplateInput};
use crate::types::*;
use crate::units::PhysicalUnit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything needed to rebuild a sheet or collage editing session
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorState {
    // Input
    pub images: Vec<String>,
    pub copies: usize,

    // Sizing (always millimetres; `unit` only affects display)
    pub unit: PhysicalUnit,
    pub photo_size: PhotoSize,
    pub spacing_mm: f32,
    pub margins: Margins,
    pub paper_size: PaperSize,

    // Sheet placements, including any swaps the user made
    pub sheets: SheetSet,
    pub current_sheet: usize,

    // Collage
    pub collage_layout: CollageLayoutType,
    /// Every source the collage was loaded with, including any the current
    /// layout has no frame for
    pub collage_sources: Vec<String>,
    pub collage_photos: Vec<CollagePhoto>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            copies: 1,
            unit: PhysicalUnit::Centimeter,
            photo_size: PhotoSize::default(),
            spacing_mm: DEFAULT_SPACING_MM,
            margins: Margins::default(),
            paper_size: PaperSize::A4,
            sheets: SheetSet::new(),
            current_sheet: 0,
            collage_layout: CollageLayoutType::default(),
            collage_sources: Vec::new(),
            collage_photos: Vec::new(),
        }
    }
}

impl EditorState {
    /// Load a snapshot from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let state = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse editor state: {}", e)))?;
        Ok(state)
    }

    /// Save the snapshot as JSON
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Sizing inputs for the page template
    pub fn template_input(&self) -> TemplateInput {
        TemplateInput {
            paper: self.paper_size,
            photo: self.photo_size,
            spacing_mm: self.spacing_mm,
            margins: self.margins,
        }
    }

    /// Photo width in the display unit
    pub fn display_photo_width(&self) -> f32 {
        self.unit.from_mm(self.photo_size.width_mm)
    }

    /// Photo height in the display unit
    pub fn display_photo_height(&self) -> f32 {
        self.unit.from_mm(self.photo_size.height_mm)
    }

    /// Validate the state
    pub fn validate(&self) -> Result<()> {
        if self.copies == 0 {
            return Err(LayoutError::Config(
                "Copies must be at least 1".to_string(),
            ));
        }
        if self.copies > MAX_COPIES {
            return Err(LayoutError::Config(format!(
                "Copies must be at most {}",
                MAX_COPIES
            )));
        }

        let PhotoSize {
            width_mm,
            height_mm,
        } = self.photo_size;
        if !(width_mm.is_finite() && width_mm > 0.0 && height_mm.is_finite() && height_mm > 0.0) {
            return Err(LayoutError::Config(
                "Photo size must be positive".to_string(),
            ));
        }

        if !(self.spacing_mm.is_finite() && self.spacing_mm >= 0.0) {
            return Err(LayoutError::Config(
                "Spacing must be non-negative".to_string(),
            ));
        }

        self.margins.validate()?;

        if self.images.len() > MAX_IMAGES {
            return Err(LayoutError::TooManyImages {
                count: self.images.len(),
                max: MAX_IMAGES,
            });
        }

        if self.collage_sources.len() > MAX_IMAGES {
            return Err(LayoutError::TooManyImages {
                count: self.collage_sources.len(),
                max: MAX_IMAGES,
            });
        }

        for photo in &self.collage_photos {
            photo.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EditorState::default().validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut state = EditorState::default();
        state.copies = 0;
        assert!(matches!(state.validate(), Err(LayoutError::Config(_))));

        let mut state = EditorState::default();
        state.photo_size.width_mm = -1.0;
        assert!(state.validate().is_err());

        let mut state = EditorState::default();
        state.spacing_mm = f32::NAN;
        assert!(state.validate().is_err());

        let mut state = EditorState::default();
        state.margins.left_mm = -2.0;
        assert!(state.validate().is_err());

        let mut state = EditorState::default();
        state.images = vec!["x".to_string(); MAX_IMAGES + 1];
        assert!(matches!(
            state.validate(),
            Err(LayoutError::TooManyImages { .. })
        ));
    }

    #[test]
    fn test_copies_upper_bound() {
        let mut state = EditorState::default();
        state.images = vec!["a".to_string(), "b".to_string()];
        state.copies = MAX_COPIES;
        assert!(state.validate().is_ok());

        state.copies = MAX_COPIES + 1;
        assert!(matches!(state.validate(), Err(LayoutError::Config(_))));

        state.copies = usize::MAX / 2 + 1;
        assert!(matches!(state.validate(), Err(LayoutError::Config(_))));
    }

    #[test]
    fn test_display_values_follow_unit() {
        let mut state = EditorState::default();
        assert!((state.display_photo_width() - 3.5).abs() < 1e-5);
        state.unit = PhysicalUnit::Inch;
        assert!((state.display_photo_width() - 35.0 / 25.4).abs() < 1e-5);
    }
}
