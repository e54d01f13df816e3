#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod handlers;
mod logger;
mod ui_components;
mod views;
mod worker;

fn main() -> eframe::Result<()> {
    let logger = logger::AppLogger::new(500);
    if let Err(e) = logger.clone().init() {
        eprintln!("Failed to install logger: {e}");
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };
    let tokio_handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("ID Photo Sheet")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "ID Photo Sheet",
        options,
        Box::new(move |cc| Ok(Box::new(app::IdPhotoApp::new(cc, tokio_handle, logger)))),
    )
}
