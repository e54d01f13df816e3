use eframe::egui;
use idphoto_runtime::PhotoCommand;
use tokio::sync::mpsc;

const PHOTO_EXTENSIONS: [&str; 10] = [
    "jpg", "jpeg", "png", "webp", "gif", "bmp", "tif", "tiff", "heic", "heif",
];

/// Landing screen shown while no photo is loaded.
///
/// Returns true when a photo was requested from the worker.
pub fn show_upload(
    ui: &mut egui::Ui,
    busy: bool,
    command_tx: &mpsc::UnboundedSender<PhotoCommand>,
) -> bool {
    let mut requested = false;
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.heading("ID Photo Sheet");
            ui.label("Crop a portrait and print several ID photos on one sheet of photo paper");
            ui.add_space(20.0);

            if ui
                .add_enabled(!busy, egui::Button::new("📂 Choose Photo..."))
                .clicked()
            {
                requested = request_photo(command_tx);
            }

            ui.add_space(10.0);
            if busy {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Converting photo...");
                });
            } else {
                ui.label("or drop an image file onto this window");
            }
        });
    });
    requested
}

/// Ask the user for a photo file and hand it to the worker
pub fn request_photo(command_tx: &mpsc::UnboundedSender<PhotoCommand>) -> bool {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Images", &PHOTO_EXTENSIONS)
        .pick_file()
    else {
        return false;
    };
    log::info!("Opening {}", path.display());
    command_tx.send(PhotoCommand::ReadUpload { path }).is_ok()
}

