use eframe::egui;
use idphoto_runtime::{PhotoCommand, PhotoUpdate, Upload, UploadTicket};
use idphoto_sheet::{Session, SheetError, View};
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::views::{EditorState, show_editor, show_upload};

pub struct IdPhotoApp {
    session: Session,
    editor: EditorState,
    /// A file is being read from disk before it can be handed to the session
    reading_upload: bool,
    status: String,
    logger: AppLogger,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<PhotoCommand>,
    update_rx: mpsc::UnboundedReceiver<PhotoUpdate>,

    _tokio_handle: tokio::runtime::Handle,
}

impl IdPhotoApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        Self {
            session: Session::default(),
            editor: EditorState::default(),
            reading_upload: false,
            status: String::new(),
            logger,
            command_tx,
            update_rx,
            _tokio_handle: tokio_handle,
        }
    }

    fn busy(&self) -> bool {
        self.reading_upload || self.session.upload_in_flight()
    }

    /// Hand a read file to the session and, if accepted, to the decoder
    fn start_upload(&mut self, upload: Upload) {
        match self.session.begin_upload(&upload) {
            Ok(ticket) => {
                self.status = format!("Converting {}...", upload.file_name);
                let _ = self
                    .command_tx
                    .send(PhotoCommand::DecodeUpload { ticket, upload });
            }
            Err(e) => {
                self.status = e.to_string();
            }
        }
    }

    /// An upload finished after the user started over
    fn discard_stale(&mut self, ticket: &UploadTicket) {
        log::debug!("Discarding result of upload {}", ticket.id());
        self.status = format!("Discarded {}", ticket.file_name());
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };
        if self.busy() {
            self.status = SheetError::UploadInProgress.to_string();
            return;
        }

        if let Some(bytes) = file.bytes {
            let mime = (!file.mime.is_empty()).then_some(file.mime);
            self.start_upload(Upload::new(file.name, mime, bytes.to_vec()));
        } else if let Some(path) = file.path {
            self.reading_upload = true;
            let _ = self.command_tx.send(PhotoCommand::ReadUpload { path });
        }
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                PhotoUpdate::UploadRead { upload } => {
                    self.reading_upload = false;
                    self.start_upload(upload);
                }
                PhotoUpdate::UploadDecoded { ticket, .. } if !self.session.is_pending(&ticket) => {
                    self.discard_stale(&ticket);
                }
                PhotoUpdate::UploadFailed { ticket, .. } if !self.session.is_pending(&ticket) => {
                    self.discard_stale(&ticket);
                }
                PhotoUpdate::UploadDecoded { ticket, image } => {
                    let result = self.session.finish_upload(&ticket, Ok(image));
                    // The session renders the sheet as soon as the photo loads
                    self.editor = EditorState {
                        preview_stale: true,
                        ..Default::default()
                    };
                    self.status = match result {
                        Ok(()) => format!("Loaded {}", ticket.file_name()),
                        Err(e) => format!("Error: {e}"),
                    };
                }
                PhotoUpdate::UploadFailed { ticket, message } => {
                    let result = self
                        .session
                        .finish_upload(&ticket, Err(SheetError::Decode(message)));
                    if let Err(e) = result {
                        self.status = format!("Could not open {}: {e}", ticket.file_name());
                    }
                }
                PhotoUpdate::SheetSaved { path, byte_count } => {
                    self.status =
                        format!("Saved sheet → {} ({} KB)", path.display(), byte_count / 1024);
                }
                PhotoUpdate::ConfigLoaded { options } => {
                    match self.session.set_options(options) {
                        Ok(()) => self.status = "Settings loaded".to_string(),
                        Err(e) => self.status = format!("Error: {e}"),
                    }
                    self.editor.preview_stale = true;
                }
                PhotoUpdate::ConfigSaved { path } => {
                    self.status = format!("Settings saved → {}", path.display());
                }
                PhotoUpdate::Error { message } => {
                    self.reading_upload = false;
                    self.status = format!("Error: {message}");
                }
            }
            ctx.request_repaint();
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.busy() {
                    ui.spinner();
                }
                ui.label(&self.status);
            });

            egui::CollapsingHeader::new("Log")
                .default_open(false)
                .show(ui, |ui| {
                    if ui.small_button("Clear").clicked() {
                        self.logger.clear();
                    }
                    egui::ScrollArea::vertical()
                        .max_height(150.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for entry in self.logger.get_entries() {
                                ui.label(format!(
                                    "{} [{}] {}",
                                    entry.timestamp.format("%H:%M:%S"),
                                    entry.level,
                                    entry.message
                                ));
                            }
                        });
                });
        });
    }
}

impl eframe::App for IdPhotoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.process_updates(ctx);

        self.show_status_bar(ctx);

        let busy = self.busy();
        egui::CentralPanel::default().show(ctx, |ui| {
            let requested = match self.session.view() {
                View::Upload => show_upload(ui, busy, &self.command_tx),
                View::Editor => show_editor(
                    ui,
                    &mut self.session,
                    &mut self.editor,
                    busy,
                    &self.command_tx,
                ),
            };
            if requested {
                self.reading_upload = true;
            }
        });

        // Start over drops the photo; forget its textures too
        if !self.session.is_editing() && self.editor.canvas_texture.is_some() {
            self.editor = EditorState::default();
        }

        if self.busy() {
            ctx.request_repaint();
        }
    }
}
