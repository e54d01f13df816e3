//! JPEG export of finished sheets

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;

use crate::types::{PageSize, PhotoSize, Result};

/// An encoded sheet ready to be written or handed to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSheet {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Encode a sheet as JPEG. `quality` is clamped to 1..=100.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    encoder.encode_image(image)?;
    Ok(bytes)
}

/// Download name for a sheet, e.g. `id_photo_3_5x4_5_on_4x6.jpg`
pub fn export_file_name(photo_key: &str, page_key: &str) -> String {
    format!(
        "id_photo_{}_on_{}.jpg",
        sanitize_key(photo_key),
        sanitize_key(page_key)
    )
}

/// File name for a catalog pair
pub fn sheet_file_name(photo: PhotoSize, page: PageSize) -> String {
    export_file_name(&photo.key(), &page.key())
}

/// Replace characters that are awkward in file names with `_`
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '.' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}
