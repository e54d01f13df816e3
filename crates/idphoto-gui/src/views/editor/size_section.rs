use eframe::egui;
use idphoto_sheet::{Orientation, PageSize, PhotoSize, Session};

use super::state::EditorState;
use crate::ui_components::{button_group, enum_selector, labeled_drag_clamped};

pub fn show(ui: &mut egui::Ui, session: &mut Session, state: &mut EditorState) {
    egui::CollapsingHeader::new("📐 Sizes")
        .default_open(true)
        .show(ui, |ui| {
            let photo_options: Vec<_> = PhotoSize::ALL
                .into_iter()
                .map(|size| (size, size.label()))
                .collect();
            let mut photo_size = session.options().photo_size;
            if enum_selector(ui, "photo_size", "Photo:", &mut photo_size, &photo_options) {
                state.apply("Changing photo size", session.set_photo_size(photo_size));
            }

            let page_options: Vec<_> = PageSize::ALL
                .into_iter()
                .map(|size| (size, size.label()))
                .collect();
            let mut page_size = session.options().page_size;
            if enum_selector(ui, "page_size", "Paper:", &mut page_size, &page_options) {
                state.apply("Changing paper size", session.set_page_size(page_size));
            }

            let mut orientation = session.options().orientation;
            if button_group(
                ui,
                &mut orientation,
                &[
                    (Orientation::Landscape, "Landscape"),
                    (Orientation::Portrait, "Portrait"),
                ],
            ) {
                state.apply("Changing orientation", session.set_orientation(orientation));
            }

            ui.add_space(5.0);
            let mut margin_mm = session.options().margin_mm;
            let mut gap_mm = session.options().gap_mm;
            let mut changed = labeled_drag_clamped(ui, "Margin:", &mut margin_mm, 0.0..=20.0, " mm");
            changed |= labeled_drag_clamped(ui, "Gap:", &mut gap_mm, 0.0..=20.0, " mm");
            if changed {
                state.apply("Changing spacing", session.set_spacing(margin_mm, gap_mm));
            }
        });
}
