//! File I/O for uploads and exported sheets

use crate::decode::{DecoderChain, Upload};
use crate::types::*;
use image::DynamicImage;
use std::path::Path;

/// Read a file from disk as an upload
pub async fn load_upload(path: impl AsRef<Path>) -> Result<Upload> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    Ok(Upload::from_path_bytes(&path, bytes))
}

/// Decode an upload off the async runtime
pub async fn decode_upload(upload: Upload) -> Result<DynamicImage> {
    tokio::task::spawn_blocking(move || DecoderChain::default().decode(&upload)).await?
}

/// Read and decode a photo in one step
pub async fn load_photo(path: impl AsRef<Path>) -> Result<(Upload, DynamicImage)> {
    let upload = load_upload(path).await?;
    let image = decode_upload(upload.clone()).await?;
    Ok((upload, image))
}

/// Write encoded sheet bytes to `path`
pub async fn save_sheet(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path.as_ref(), bytes).await?;
    log::info!(
        "Saved sheet to {} ({} bytes)",
        path.as_ref().display(),
        bytes.len()
    );
    Ok(())
}
