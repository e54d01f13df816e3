//! Sheet rasterization
//!
//! Paints the page background, tiles the photo into every grid cell and
//! outlines each cell with a cutting guide.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::borrow::Cow;

use crate::constants::BACKGROUND_COLOR;
use crate::layout::{GridLayout, cell_origin_px, compute_layout_px};
use crate::options::SheetOptions;
use crate::types::{CellSpec, PageSpec, Result, SheetError};

use super::guides::{GuideStyle, draw_cutting_guide};

/// A rendered sheet together with the layout it was drawn from
#[derive(Debug, Clone)]
pub struct RenderedSheet {
    pub image: RgbImage,
    pub layout: GridLayout,
}

/// Rasterize a full sheet into `target`.
///
/// `target` is resized to the page if needed and always repainted from a
/// white background, so calling this again fully replaces earlier content.
/// `cell_source` is resampled when it is not already exactly cell-sized.
pub fn render_sheet(
    target: &mut RgbImage,
    page: PageSpec,
    cell: CellSpec,
    layout: &GridLayout,
    cell_source: &RgbImage,
    guides: Option<&GuideStyle>,
) {
    clear_to_page(target, page);

    if layout.is_empty() || cell.is_empty() {
        return;
    }

    let tile = fit_to_cell(cell_source, cell);

    for pos in layout.positions() {
        let (x, y) = cell_origin_px(layout, pos);
        imageops::replace(target, tile.as_ref(), x, y);

        if let Some(style) = guides {
            draw_cutting_guide(target, x, y, cell.width_px, cell.height_px, style);
        }
    }
}

/// Lay out and render a sheet for `options` in one step.
pub fn render_sheet_image(cell_source: &RgbImage, options: &SheetOptions) -> Result<RenderedSheet> {
    options.validate()?;
    if cell_source.width() == 0 || cell_source.height() == 0 {
        return Err(SheetError::Config("Photo has no pixels".to_string()));
    }

    let page = options.page();
    let cell = options.cell();
    let layout = compute_layout_px(page, cell, options.margin_px(), options.gap_px());
    let guides = GuideStyle::from_options(&options.guides);

    let mut image = RgbImage::new(page.width_px, page.height_px);
    render_sheet(&mut image, page, cell, &layout, cell_source, guides.as_ref());

    Ok(RenderedSheet { image, layout })
}

fn clear_to_page(target: &mut RgbImage, page: PageSpec) {
    let background = Rgb(BACKGROUND_COLOR);
    if target.dimensions() != (page.width_px, page.height_px) {
        *target = RgbImage::from_pixel(page.width_px, page.height_px, background);
    } else {
        target.pixels_mut().for_each(|pixel| *pixel = background);
    }
}

fn fit_to_cell(source: &RgbImage, cell: CellSpec) -> Cow<'_, RgbImage> {
    if source.dimensions() == (cell.width_px, cell.height_px) {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(imageops::resize(
            source,
            cell.width_px,
            cell.height_px,
            FilterType::Lanczos3,
        ))
    }
}
