//! Shared constants for print sheet generation
//!
//! Every physical measurement is converted to pixels at a single print
//! resolution so that pages, photo cells, margins and gaps share one unit.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Print resolution in dots per inch
pub const DPI: f32 = 300.0;

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Convert millimeters to whole pixels at [`DPI`]
#[inline]
pub fn mm_to_px(mm: f32) -> u32 {
    (mm / MM_PER_INCH * DPI).round().max(0.0) as u32
}

/// Convert inches to whole pixels at [`DPI`]
#[inline]
pub fn inches_to_px(inches: f32) -> u32 {
    (inches * DPI).round().max(0.0) as u32
}

// =============================================================================
// Grid Spacing
// =============================================================================

/// Default distance between the page edge and the outermost photos (mm)
pub const DEFAULT_MARGIN_MM: f32 = 2.0;

/// Default distance between adjacent photos (mm)
pub const DEFAULT_GAP_MM: f32 = 2.0;

// =============================================================================
// Cutting Guides
// =============================================================================

/// Stroke width of the dashed cutting guide (pixels). 1px at 300dpi is
/// thin enough to disappear under scissors.
pub const GUIDE_LINE_WIDTH_PX: u32 = 1;

/// Length of a drawn dash segment (pixels)
pub const GUIDE_DASH_PX: u32 = 10;

/// Length of the gap between dash segments (pixels)
pub const GUIDE_GAP_PX: u32 = 10;

/// Light gray (#cccccc)
pub const GUIDE_COLOR: [u8; 3] = [0xcc, 0xcc, 0xcc];

/// Sheet background
pub const BACKGROUND_COLOR: [u8; 3] = [0xff, 0xff, 0xff];

// =============================================================================
// Cropping
// =============================================================================

/// Fraction of the largest fitting box used for the initial crop selection
pub const AUTO_CROP_AREA: f32 = 0.8;

/// Smallest crop selection edge, in canvas pixels
pub const MIN_SELECTION_PX: f32 = 8.0;

// =============================================================================
// Export
// =============================================================================

/// JPEG quality used for the downloadable sheet
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

