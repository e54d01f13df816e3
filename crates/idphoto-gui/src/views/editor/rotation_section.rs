use eframe::egui;
use idphoto_sheet::Session;

use super::state::EditorState;
use crate::ui_components::SliderBuilder;

pub fn show(ui: &mut egui::Ui, session: &mut Session, state: &mut EditorState) {
    egui::CollapsingHeader::new("🔄 Rotation")
        .default_open(true)
        .show(ui, |ui| {
            let response = SliderBuilder::new(&mut state.rotation, -180.0..=180.0)
                .suffix("°")
                .show(ui);

            // Rotating a full-size photo is slow, so wait for the release
            if response.drag_stopped() || (response.changed() && !response.dragged()) {
                let degrees = state.rotation;
                state.apply("Rotating photo", session.rotate_to(degrees));
            }

            ui.horizontal(|ui| {
                for (label, delta) in [("⟲ 90°", -90.0), ("⟳ 90°", 90.0)] {
                    if ui.button(label).clicked() {
                        state.rotation = wrap_degrees(state.rotation + delta);
                        let degrees = state.rotation;
                        state.apply("Rotating photo", session.rotate_to(degrees));
                    }
                }
                if ui.button("Reset").clicked() {
                    state.rotation = 0.0;
                    state.apply("Rotating photo", session.rotate_to(0.0));
                }
            });
        });
}

/// Keep an angle inside -180..=180
fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}
