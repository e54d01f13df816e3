//! Layout calculation modules for print sheets
//!
//! This module handles the geometry of tiling photos onto a page:
//! - Grid fitting (rows, columns, centered origin)
//! - Cell placement (per-tile bounds)

mod grid;
mod types;

pub use grid::*;
pub use types::*;
