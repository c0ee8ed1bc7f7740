use card_async_runtime::{LayoutOptions, ScanUpdate, UpdateSender};
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn handle_preview(
    front: Option<Arc<DynamicImage>>,
    back: Option<Arc<DynamicImage>>,
    width_px: u32,
    options: LayoutOptions,
    update_tx: &UpdateSender,
) {
    match card_layout::preview(front, back, width_px, &options).await {
        Ok(page) => {
            let (width, height) = (page.width() as usize, page.height() as usize);
            let _ = update_tx.send(ScanUpdate::PreviewComposed {
                width,
                height,
                rgba_data: page.into_raw(),
            });
        }
        Err(e) => {
            let _ = update_tx.send(ScanUpdate::Error {
                message: format!("Failed to compose preview: {e}"),
            });
        }
    }
}

pub async fn handle_export(
    front: Arc<DynamicImage>,
    back: Arc<DynamicImage>,
    options: LayoutOptions,
    output_path: PathBuf,
    update_tx: &UpdateSender,
) {
    match card_layout::write_pdf(front, back, &options, &output_path).await {
        Ok(()) => {
            let _ = update_tx.send(ScanUpdate::Exported { path: output_path });
        }
        Err(e) => {
            let _ = update_tx.send(ScanUpdate::Error {
                message: format!("Failed to export PDF: {e}"),
            });
        }
    }
}

pub async fn handle_load_config(path: PathBuf, update_tx: &UpdateSender) {
    match LayoutOptions::load(&path).await {
        Ok(options) => {
            let _ = update_tx.send(ScanUpdate::LayoutConfigLoaded { options });
        }
        Err(e) => {
            let _ = update_tx.send(ScanUpdate::Error {
                message: format!("Failed to load layout config: {e}"),
            });
        }
    }
}
