use idphoto_runtime::PhotoUpdate;
use idphoto_sheet::save_sheet;
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_save(
    bytes: Vec<u8>,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    match save_sheet(&bytes, &path).await {
        Ok(()) => {
            let _ = update_tx.send(PhotoUpdate::SheetSaved {
                path,
                byte_count: bytes.len(),
            });
        }
        Err(e) => {
            let _ = update_tx.send(PhotoUpdate::Error {
                message: format!("Failed to save sheet: {e}"),
            });
        }
    }
}
