#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod canvas;
mod handlers;
mod logger;
mod ui_components;
mod views;
mod worker;

const LOG_CAPACITY: usize = 200;

fn main() -> anyhow::Result<()> {
    let logger = logger::AppLogger::new(LOG_CAPACITY);
    logger.clone().init()?;

    // The UI thread belongs to eframe; the worker runs on this runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_title("ID Card to PDF"),
        ..Default::default()
    };

    eframe::run_native(
        "ID Card to PDF",
        options,
        Box::new(move |cc| Ok(Box::new(app::CardToolsApp::new(cc, handle, logger)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI exited with an error: {e}"))?;

    Ok(())
}
