use std::path::PathBuf;

// Re-export types from the sheet library
pub use idphoto_sheet::{SheetOptions, SheetStatistics, Upload, UploadTicket};
pub use image::DynamicImage;

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PhotoCommand {
    /// Read a photo file from disk without decoding it
    ReadUpload {
        path: PathBuf,
    },
    /// Decode an upload the session has accepted
    DecodeUpload {
        ticket: UploadTicket,
        upload: Upload,
    },
    SaveSheet {
        bytes: Vec<u8>,
        path: PathBuf,
    },
    LoadConfig {
        path: PathBuf,
    },
    SaveConfig {
        options: SheetOptions,
        path: PathBuf,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PhotoUpdate {
    UploadRead {
        upload: Upload,
    },
    UploadDecoded {
        ticket: UploadTicket,
        image: DynamicImage,
    },
    UploadFailed {
        ticket: UploadTicket,
        message: String,
    },
    SheetSaved {
        path: PathBuf,
        byte_count: usize,
    },
    ConfigLoaded {
        options: SheetOptions,
    },
    ConfigSaved {
        path: PathBuf,
    },
    Error {
        message: String,
    },
}
