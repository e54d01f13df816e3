use crate::layout::{GridLayout, compute_layout_px};
use crate::options::SheetOptions;
use crate::types::*;

/// Calculate how many photos fit on one sheet for the given options
pub fn calculate_statistics(options: &SheetOptions) -> Result<SheetStatistics> {
    options.validate()?;

    let page = options.page();
    let cell = options.cell();
    let layout = compute_layout_px(page, cell, options.margin_px(), options.gap_px());

    Ok(statistics_for_layout(page, cell, &layout))
}

/// Statistics for an already computed layout
pub fn statistics_for_layout(page: PageSpec, cell: CellSpec, layout: &GridLayout) -> SheetStatistics {
    let photos_per_sheet = layout.cell_count();

    let page_area = u64::from(page.width_px) * u64::from(page.height_px);
    let photo_area =
        u64::from(photos_per_sheet) * u64::from(cell.width_px) * u64::from(cell.height_px);
    let coverage = if page_area == 0 {
        0.0
    } else {
        (photo_area as f64 / page_area as f64) as f32
    };

    SheetStatistics {
        page,
        cell,
        columns: layout.columns,
        rows: layout.rows,
        photos_per_sheet,
        leftover_x_px: page.width_px.saturating_sub(layout.total_width()),
        leftover_y_px: page.height_px.saturating_sub(layout.total_height()),
        coverage,
    }
}
