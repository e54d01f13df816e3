use idphoto_runtime::{PhotoUpdate, SheetOptions};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_load(path: PathBuf, update_tx: &mpsc::UnboundedSender<PhotoUpdate>) {
    match SheetOptions::load(&path).await {
        Ok(options) => {
            log::info!("Configuration loaded from {}", path.display());
            let _ = update_tx.send(PhotoUpdate::ConfigLoaded { options });
        }
        Err(e) => {
            let _ = update_tx.send(PhotoUpdate::Error {
                message: format!("Failed to load configuration: {e}"),
            });
        }
    }
}

pub async fn handle_save(
    options: SheetOptions,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    match options.save(&path).await {
        Ok(()) => {
            let _ = update_tx.send(PhotoUpdate::ConfigSaved { path });
        }
        Err(e) => {
            let _ = update_tx.send(PhotoUpdate::Error {
                message: format!("Failed to save configuration: {e}"),
            });
        }
    }
}
