use idphoto_runtime::{PhotoCommand, PhotoUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that processes photo commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PhotoCommand>,
    update_tx: mpsc::UnboundedSender<PhotoUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx).await;
    }
    log::debug!("Worker stopped");
}

async fn process_command(cmd: PhotoCommand, update_tx: &mpsc::UnboundedSender<PhotoUpdate>) {
    match cmd {
        PhotoCommand::ReadUpload { path } => {
            handlers::upload::handle_read(path, update_tx).await;
        }
        PhotoCommand::DecodeUpload { ticket, upload } => {
            handlers::upload::handle_decode(ticket, upload, update_tx).await;
        }
        PhotoCommand::SaveSheet { bytes, path } => {
            handlers::export::handle_save(bytes, path, update_tx).await;
        }
        PhotoCommand::LoadConfig { path } => {
            handlers::config::handle_load(path, update_tx).await;
        }
        PhotoCommand::SaveConfig { options, path } => {
            handlers::config::handle_save(options, path, update_tx).await;
        }
    }
}
