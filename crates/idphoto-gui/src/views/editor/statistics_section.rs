use eframe::egui;
use idphoto_sheet::Session;

pub fn show(ui: &mut egui::Ui, session: &Session) {
    egui::CollapsingHeader::new("📊 Statistics")
        .default_open(true)
        .show(ui, |ui| {
            let stats = session.statistics();
            ui.label(format!(
                "Paper: {} × {} px",
                stats.page.width_px, stats.page.height_px
            ));
            ui.label(format!(
                "Photo: {} × {} px",
                stats.cell.width_px, stats.cell.height_px
            ));

            if stats.photos_per_sheet == 0 {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    "This photo size does not fit on the paper",
                );
            } else {
                ui.label(format!(
                    "Photos per sheet: {} ({} × {})",
                    stats.photos_per_sheet, stats.columns, stats.rows
                ));
                ui.label(format!("Paper coverage: {:.0}%", stats.coverage * 100.0));
            }
        });
}
