use idphoto_runtime::{PhotoUpdate, Upload, UploadTicket};
use idphoto_sheet::{SheetError, decode_upload, load_upload};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_read(path: PathBuf, update_tx: &mpsc::UnboundedSender<PhotoUpdate>) {
    match load_upload(&path).await {
        Ok(upload) => {
            let _ = update_tx.send(PhotoUpdate::UploadRead { upload });
        }
        Err(e) => {
            let _ = update_tx.send(PhotoUpdate::Error {
                message: format!("Failed to read {}: {e}", path.display()),
            });
        }
    }
}

pub async fn handle_decode(
    ticket: UploadTicket,
    upload: Upload,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    let update = match decode_upload(upload).await {
        Ok(image) => PhotoUpdate::UploadDecoded { ticket, image },
        // The app re-wraps the cause in `SheetError::Decode`
        Err(SheetError::Decode(cause)) => PhotoUpdate::UploadFailed {
            ticket,
            message: cause,
        },
        Err(e) => PhotoUpdate::UploadFailed {
            ticket,
            message: e.to_string(),
        },
    };
    let _ = update_tx.send(update);
}

#[cfg(test)]
mod tests {
    use super::*;
    use idphoto_sheet::Session;

    #[tokio::test]
    async fn test_decode_failure_sends_bare_cause() {
        let upload = Upload::new("broken.png", Some("image/png".into()), b"not a png".to_vec());
        let mut session: Session = Session::default();
        let ticket = session.begin_upload(&upload).unwrap();

        let (update_tx, mut update_rx) = mpsc::unbounded_channel();
        handle_decode(ticket.clone(), upload, &update_tx).await;

        let Some(PhotoUpdate::UploadFailed { ticket: failed, message }) = update_rx.recv().await
        else {
            panic!("expected an upload failure");
        };
        assert_eq!(failed, ticket);

        let err = session
            .finish_upload(&failed, Err(SheetError::Decode(message)))
            .unwrap_err();
        assert_eq!(err.to_string().matches("Failed to decode image").count(), 1);
    }
}
