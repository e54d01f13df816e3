use crate::constants::{inches_to_px, mm_to_px};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Only image files can be uploaded: {file_name}")]
    UnsupportedUpload { file_name: String },
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Another upload is still being converted")]
    UploadInProgress,
    #[error("No photo is loaded")]
    NotEditing,
    #[error("No sheet has been rendered yet")]
    NothingToExport,
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// A width and height in pixels at the print resolution.
///
/// Sizes are derived once from millimeters or inches and then used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicalSize {
    pub width_px: u32,
    pub height_px: u32,
}

impl PhysicalSize {
    pub const fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    pub fn from_mm(width_mm: f32, height_mm: f32) -> Self {
        Self::new(mm_to_px(width_mm), mm_to_px(height_mm))
    }

    pub fn from_inches(width_in: f32, height_in: f32) -> Self {
        Self::new(inches_to_px(width_in), inches_to_px(height_in))
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height_px == 0 {
            return 1.0;
        }
        self.width_px as f32 / self.height_px as f32
    }

    /// Swap width and height
    pub fn transposed(self) -> Self {
        Self::new(self.height_px, self.width_px)
    }

    pub fn is_empty(&self) -> bool {
        self.width_px == 0 || self.height_px == 0
    }
}

/// The print sheet photos are tiled onto
pub type PageSpec = PhysicalSize;

/// The output size of a single photo
pub type CellSpec = PhysicalSize;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Long edge vertical
    Portrait,
    /// Long edge horizontal. Packs the most ID photos onto photo paper.
    #[default]
    Landscape,
}

/// Photo paper sizes the sheet can be printed on
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSize {
    /// 4 × 6 inch photo paper
    FourBySix,
    /// 3 × 5 inch photo paper
    ThreeByFive,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PageSize {
    pub const ALL: [PageSize; 2] = [PageSize::FourBySix, PageSize::ThreeByFive];

    /// Short catalog key, also used in exported file names
    pub fn key(&self) -> String {
        match self {
            PageSize::FourBySix => "4x6".to_string(),
            PageSize::ThreeByFive => "3x5".to_string(),
            PageSize::Custom {
                width_mm,
                height_mm,
            } => format!("{}x{}mm", width_mm, height_mm),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.key() == key)
    }

    pub fn label(&self) -> String {
        match self {
            PageSize::FourBySix => "4 × 6 in".to_string(),
            PageSize::ThreeByFive => "3 × 5 in".to_string(),
            PageSize::Custom {
                width_mm,
                height_mm,
            } => format!("{} × {} mm", width_mm, height_mm),
        }
    }

    /// Pixel dimensions in portrait orientation (width <= height)
    pub fn portrait_size(&self) -> PageSpec {
        match *self {
            PageSize::FourBySix => PhysicalSize::from_inches(4.0, 6.0),
            PageSize::ThreeByFive => PhysicalSize::from_inches(3.0, 5.0),
            PageSize::Custom {
                width_mm,
                height_mm,
            } => {
                let size = PhysicalSize::from_mm(width_mm, height_mm);
                if size.width_px > size.height_px {
                    size.transposed()
                } else {
                    size
                }
            }
        }
    }

    /// Pixel dimensions with orientation applied
    pub fn size_with_orientation(&self, orientation: Orientation) -> PageSpec {
        let portrait = self.portrait_size();
        match orientation {
            Orientation::Portrait => portrait,
            Orientation::Landscape => portrait.transposed(),
        }
    }
}

/// ID photo sizes, named by their width × height in centimeters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhotoSize {
    /// 3.5 × 4.5 cm (passport)
    Passport,
    /// 3 × 4 cm
    ThreeByFour,
    /// 5 × 5 cm
    Square,
    /// 5 × 7 cm
    FiveBySeven,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PhotoSize {
    pub const ALL: [PhotoSize; 4] = [
        PhotoSize::Passport,
        PhotoSize::ThreeByFour,
        PhotoSize::Square,
        PhotoSize::FiveBySeven,
    ];

    pub fn key(&self) -> String {
        match self {
            PhotoSize::Passport => "3.5x4.5".to_string(),
            PhotoSize::ThreeByFour => "3x4".to_string(),
            PhotoSize::Square => "5x5".to_string(),
            PhotoSize::FiveBySeven => "5x7".to_string(),
            PhotoSize::Custom {
                width_mm,
                height_mm,
            } => format!("{}x{}mm", width_mm, height_mm),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.key() == key)
    }

    pub fn label(&self) -> String {
        match self {
            PhotoSize::Passport => "3.5 × 4.5 cm".to_string(),
            PhotoSize::ThreeByFour => "3 × 4 cm".to_string(),
            PhotoSize::Square => "5 × 5 cm".to_string(),
            PhotoSize::FiveBySeven => "5 × 7 cm".to_string(),
            PhotoSize::Custom {
                width_mm,
                height_mm,
            } => format!("{} × {} mm", width_mm, height_mm),
        }
    }

    pub fn dimensions_mm(&self) -> (f32, f32) {
        match *self {
            PhotoSize::Passport => (35.0, 45.0),
            PhotoSize::ThreeByFour => (30.0, 40.0),
            PhotoSize::Square => (50.0, 50.0),
            PhotoSize::FiveBySeven => (50.0, 70.0),
            PhotoSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    pub fn cell_size(&self) -> CellSpec {
        let (width_mm, height_mm) = self.dimensions_mm();
        PhysicalSize::from_mm(width_mm, height_mm)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.cell_size().aspect_ratio()
    }
}

/// Layout statistics for a page/photo combination
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStatistics {
    /// Page size in pixels
    pub page: PageSpec,
    /// Photo cell size in pixels
    pub cell: CellSpec,
    /// Photos per row
    pub columns: u32,
    /// Photos per column
    pub rows: u32,
    /// Total photos on one sheet (0 when the photo does not fit)
    pub photos_per_sheet: u32,
    /// Unused pixels left and right of the grid combined
    pub leftover_x_px: u32,
    /// Unused pixels above and below the grid combined
    pub leftover_y_px: u32,
    /// Fraction of the page covered by photos
    pub coverage: f32,
}
