use eframe::egui;
use idphoto_runtime::PhotoCommand;
use idphoto_sheet::Session;
use tokio::sync::mpsc;

use super::state::EditorState;
use crate::views::request_photo;

/// Returns true when a new photo was requested
pub fn show(
    ui: &mut egui::Ui,
    session: &mut Session,
    state: &mut EditorState,
    busy: bool,
    command_tx: &mpsc::UnboundedSender<PhotoCommand>,
) -> bool {
    let mut requested = false;

    ui.vertical(|ui| {
        if ui.button("👁 Render Preview").clicked() {
            let result = session.render_preview().map(|_| ());
            state.apply("Rendering preview", result);
        }

        ui.add_space(5.0);

        if ui
            .add_enabled(session.can_export(), egui::Button::new("💾 Save Sheet..."))
            .clicked()
        {
            save_sheet(session, command_tx);
        }

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("📷 Another Photo..."))
                .clicked()
            {
                requested = request_photo(command_tx);
            }
            if ui.button("✖ Start Over").clicked() {
                session.reset();
            }
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            show_config_buttons(ui, session, command_tx);
        });
    });

    requested
}

fn save_sheet(session: &Session, command_tx: &mpsc::UnboundedSender<PhotoCommand>) {
    let sheet = match session.export() {
        Ok(sheet) => sheet,
        Err(e) => {
            log::error!("Export failed: {e}");
            return;
        }
    };

    if let Some(path) = rfd::FileDialog::new()
        .add_filter("JPEG", &["jpg", "jpeg"])
        .set_file_name(&sheet.file_name)
        .save_file()
    {
        log::info!("Saving sheet to: {}", path.display());
        let _ = command_tx.send(PhotoCommand::SaveSheet {
            bytes: sheet.bytes,
            path,
        });
    }
}

fn show_config_buttons(
    ui: &mut egui::Ui,
    session: &Session,
    command_tx: &mpsc::UnboundedSender<PhotoCommand>,
) {
    if ui.button("💾 Save Settings").clicked() {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("idphoto_settings.json")
            .save_file()
        {
            let _ = command_tx.send(PhotoCommand::SaveConfig {
                options: session.options().clone(),
                path,
            });
        }
    }

    if ui.button("📂 Load Settings").clicked() {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            let _ = command_tx.send(PhotoCommand::LoadConfig { path });
        }
    }
}
