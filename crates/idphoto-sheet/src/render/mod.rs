//! Raster output for print sheets
//!
//! - `sheet`: background, photo tiles and the per-cell loop
//! - `guides`: dashed cutting outlines around each cell

mod guides;
mod sheet;

pub use guides::{GuideStyle, dash_spans, draw_cutting_guide};
pub use sheet::{RenderedSheet, render_sheet, render_sheet_image};
