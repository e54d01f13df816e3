//! Layout data types for sheet tiling
//!
//! All coordinates are in sheet pixels with the origin at the top-left
//! corner and y growing downwards, matching raster image coordinates.

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: u32,
    /// Column index (0 = leftmost column)
    pub col: u32,
}

impl GridPosition {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Result of fitting photo cells onto a page
///
/// `columns` or `rows` is zero when not even a single cell fits inside the
/// margins; such a layout places no tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Number of photo columns
    pub columns: u32,
    /// Number of photo rows
    pub rows: u32,
    /// Left edge of the first column, chosen so the grid is centered
    pub origin_x: f32,
    /// Top edge of the first row, chosen so the grid is centered
    pub origin_y: f32,
    /// Width of one cell in pixels
    pub cell_width_px: u32,
    /// Height of one cell in pixels
    pub cell_height_px: u32,
    /// Spacing between adjacent cells in pixels
    pub gap_px: u32,
    /// Minimum spacing between the page edge and the grid in pixels
    pub margin_px: u32,
}

impl GridLayout {
    /// Total number of cells in the grid
    pub fn cell_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// True when no tile will be drawn
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Width of the tiled block including inner gaps
    pub fn total_width(&self) -> u32 {
        occupied_span(self.columns, self.cell_width_px, self.gap_px)
    }

    /// Height of the tiled block including inner gaps
    pub fn total_height(&self) -> u32 {
        occupied_span(self.rows, self.cell_height_px, self.gap_px)
    }

    /// Horizontal distance between the left edges of adjacent columns
    pub fn column_pitch(&self) -> u32 {
        self.cell_width_px + self.gap_px
    }

    /// Vertical distance between the top edges of adjacent rows
    pub fn row_pitch(&self) -> u32 {
        self.cell_height_px + self.gap_px
    }

    /// Every grid position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |col| GridPosition::new(row, col)))
    }
}

/// `count` cells of `cell` pixels separated by `gap` pixels
pub(crate) fn occupied_span(count: u32, cell: u32, gap: u32) -> u32 {
    if count == 0 {
        0
    } else {
        count * cell + (count - 1) * gap
    }
}

/// A rectangular area in sheet pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}
