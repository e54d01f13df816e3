mod actions_section;
mod crop_canvas;
mod rotation_section;
mod size_section;
mod state;
mod statistics_section;

pub use state::EditorState;

use eframe::egui;
use idphoto_runtime::PhotoCommand;
use idphoto_sheet::Session;
use tokio::sync::mpsc;

/// Editor screen. Returns true when a new photo was requested.
pub fn show_editor(
    ui: &mut egui::Ui,
    session: &mut Session,
    state: &mut EditorState,
    busy: bool,
    command_tx: &mpsc::UnboundedSender<PhotoCommand>,
) -> bool {
    let mut requested = false;

    egui::SidePanel::left("editor_controls")
        .min_width(280.0)
        .show_inside(ui, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("ID Photo Sheet");
                if let Some(editing) = session.editing() {
                    ui.label(&editing.source_name);
                }
                ui.separator();

                size_section::show(ui, session, state);
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                rotation_section::show(ui, session, state);
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                statistics_section::show(ui, session);
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                requested = actions_section::show(ui, session, state, busy, command_tx);
            });
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        ui.columns(2, |columns| {
            columns[0].label("Drag to move the crop, scroll to resize it");
            crop_canvas::show(&mut columns[0], session, state);

            show_preview_area(&mut columns[1], state);
        });
    });

    state.sync_preview(ui.ctx(), session);
    requested
}

fn show_preview_area(ui: &mut egui::Ui, state: &EditorState) {
    match &state.preview_texture {
        Some(texture) => {
            let size = texture.size_vec2();
            let available = ui.available_size();
            let scale = (available.x / size.x).min(available.y / size.y).min(1.0);
            ui.add(egui::Image::from_texture(egui::load::SizedTexture::new(
                texture.id(),
                size * scale,
            )));
        }
        None => {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("No Preview Yet");
                    ui.label("Click 'Render Preview' to see the print sheet");
                });
            });
        }
    }
}
