//! Grid layout calculation
//!
//! Fits as many fixed-size photo cells as possible onto a page, keeping a
//! margin around the page edge and a gap between cells, then centers the
//! resulting block so leftover space is split evenly on opposite edges.

use crate::constants::mm_to_px;
use crate::types::{CellSpec, PageSpec};

use super::types::occupied_span;
use super::{GridLayout, GridPosition, Rect};

// =============================================================================
// Grid Creation
// =============================================================================

/// Compute the tiling of `cell` onto `page` with physical spacing.
///
/// # Arguments
/// * `page` - The print sheet in pixels
/// * `cell` - One photo in pixels
/// * `margin_mm` - Spacing between the page edge and the outermost cells
/// * `gap_mm` - Spacing between adjacent cells
pub fn compute_layout(page: PageSpec, cell: CellSpec, margin_mm: f32, gap_mm: f32) -> GridLayout {
    compute_layout_px(page, cell, mm_to_px(margin_mm), mm_to_px(gap_mm))
}

/// Compute the tiling of `cell` onto `page` with spacing already in pixels.
pub fn compute_layout_px(page: PageSpec, cell: CellSpec, margin_px: u32, gap_px: u32) -> GridLayout {
    let columns = fit_count(page.width_px, cell.width_px, margin_px, gap_px);
    let rows = fit_count(page.height_px, cell.height_px, margin_px, gap_px);

    let total_width = occupied_span(columns, cell.width_px, gap_px);
    let total_height = occupied_span(rows, cell.height_px, gap_px);

    GridLayout {
        columns,
        rows,
        origin_x: centered_origin(page.width_px, total_width),
        origin_y: centered_origin(page.height_px, total_height),
        cell_width_px: cell.width_px,
        cell_height_px: cell.height_px,
        gap_px,
        margin_px,
    }
}

/// How many cells fit along one axis: `floor((page - 2*margin) / (cell + gap))`,
/// never negative.
fn fit_count(page: u32, cell: u32, margin: u32, gap: u32) -> u32 {
    let available = i64::from(page) - 2 * i64::from(margin);
    let pitch = i64::from(cell) + i64::from(gap);
    if available <= 0 || pitch <= 0 {
        return 0;
    }
    (available / pitch) as u32
}

fn centered_origin(page: u32, occupied: u32) -> f32 {
    (page as f32 - occupied as f32) / 2.0
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Calculate the bounds of the cell at the given grid position.
pub fn cell_rect(layout: &GridLayout, pos: GridPosition) -> Rect {
    let x = layout.origin_x + pos.col as f32 * layout.column_pitch() as f32;
    let y = layout.origin_y + pos.row as f32 * layout.row_pitch() as f32;

    Rect::new(
        x,
        y,
        layout.cell_width_px as f32,
        layout.cell_height_px as f32,
    )
}

/// Top-left pixel of the cell at `pos`, rounded to the pixel grid.
pub fn cell_origin_px(layout: &GridLayout, pos: GridPosition) -> (i64, i64) {
    let rect = cell_rect(layout, pos);
    (rect.x.round() as i64, rect.y.round() as i64)
}

// =============================================================================
// Tests
// =============================================================================
