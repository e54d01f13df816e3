use crate::options::SheetOptions;
use crate::render::{RenderedSheet, render_sheet_image};
use crate::types::*;
use image::RgbImage;

/// Render a sheet on the blocking pool
///
/// `cell_source` is the cropped photo; it is resampled to the cell size if
/// needed.
pub async fn generate_sheet(cell_source: RgbImage, options: &SheetOptions) -> Result<RenderedSheet> {
    options.validate()?;
    let options = options.clone();

    tokio::task::spawn_blocking(move || render_sheet_image(&cell_source, &options)).await?
}
