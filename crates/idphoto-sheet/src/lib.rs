//! ID photo print sheets
//!
//! Crop one portrait to a standard ID photo size, tile as many copies as fit
//! onto photo paper at 300 DPI, outline each with a dashed cutting guide and
//! export the sheet as a JPEG.

pub mod constants;
pub mod crop;
pub mod decode;
mod export;
mod io;
pub mod layout;
mod options;
mod preview;
pub mod render;
mod session;
mod stats;
mod types;

pub use crop::{CropBox, CropProvider, ImageCropper};
pub use decode::{DecoderChain, Upload, is_supported_upload};
pub use export::{ExportedSheet, encode_jpeg, export_file_name, sanitize_key, sheet_file_name};
pub use io::{decode_upload, load_photo, load_upload, save_sheet};
pub use layout::{GridLayout, compute_layout, compute_layout_px};
pub use options::*;
pub use preview::generate_sheet;
pub use render::{RenderedSheet, render_sheet_image};
pub use session::{EditingState, Session, SessionState, UploadTicket, View};
pub use stats::{calculate_statistics, statistics_for_layout};
pub use types::*;
