use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dashed outline drawn around every photo for manual trimming
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CuttingGuides {
    /// Draw the guides at all
    pub enabled: bool,
    /// Stroke color (RGB)
    pub color: [u8; 3],
    /// Stroke width in pixels
    pub line_width_px: u32,
    /// Length of each drawn dash in pixels
    pub dash_px: u32,
    /// Length of each gap between dashes in pixels
    pub gap_px: u32,
}

impl Default for CuttingGuides {
    fn default() -> Self {
        Self {
            enabled: true,
            color: GUIDE_COLOR,
            line_width_px: GUIDE_LINE_WIDTH_PX,
            dash_px: GUIDE_DASH_PX,
            gap_px: GUIDE_GAP_PX,
        }
    }
}

/// Everything needed to lay out and export a sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetOptions {
    // Paper
    pub page_size: PageSize,
    pub orientation: Orientation,

    // Photo
    pub photo_size: PhotoSize,

    // Spacing
    pub margin_mm: f32,
    pub gap_mm: f32,

    // Cutting guides
    pub guides: CuttingGuides,

    // Export
    pub jpeg_quality: u8,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::FourBySix,
            orientation: Orientation::Landscape,
            photo_size: PhotoSize::Passport,
            margin_mm: DEFAULT_MARGIN_MM,
            gap_mm: DEFAULT_GAP_MM,
            guides: CuttingGuides::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl SheetOptions {
    /// Page size in pixels with orientation applied
    pub fn page(&self) -> PageSpec {
        self.page_size.size_with_orientation(self.orientation)
    }

    /// Photo cell size in pixels
    pub fn cell(&self) -> CellSpec {
        self.photo_size.cell_size()
    }

    /// Margin in pixels
    pub fn margin_px(&self) -> u32 {
        mm_to_px(self.margin_mm)
    }

    /// Gap in pixels
    pub fn gap_px(&self) -> u32 {
        mm_to_px(self.gap_mm)
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SheetError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(SheetError::Config(format!(
                "Margin must be a non-negative length, got {} mm",
                self.margin_mm
            )));
        }

        if !self.gap_mm.is_finite() || self.gap_mm < 0.0 {
            return Err(SheetError::Config(format!(
                "Gap must be a non-negative length, got {} mm",
                self.gap_mm
            )));
        }

        if self.page().is_empty() {
            return Err(SheetError::Config(format!(
                "Page size {} has no area",
                self.page_size.label()
            )));
        }

        if self.cell().is_empty() {
            return Err(SheetError::Config(format!(
                "Photo size {} has no area",
                self.photo_size.label()
            )));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SheetError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }

        if self.guides.enabled && self.guides.dash_px == 0 {
            return Err(SheetError::Config(
                "Cutting guide dashes must be at least 1px long".to_string(),
            ));
        }

        Ok(())
    }
}
