use card_async_runtime::{CommandSender, LayoutOptions, ScanCommand};
use card_layout::DEFAULT_PDF_NAME;
use eframe::egui;
use image::DynamicImage;
use std::sync::Arc;

use crate::ui_components::LayoutOptionsEditor;

/// Raster width of the page preview
pub const PREVIEW_WIDTH_PX: u32 = 420;

const PREVIEW_DISPLAY_HEIGHT: f32 = 320.0;

#[derive(Default)]
pub struct LayoutState {
    pub options: LayoutOptions,
    pub preview_texture: Option<egui::TextureHandle>,
}

impl LayoutState {
    pub fn set_preview(&mut self, ctx: &egui::Context, width: usize, height: usize, rgba: &[u8]) {
        let color_image = egui::ColorImage::from_rgba_unmultiplied([width, height], rgba);
        match &mut self.preview_texture {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.preview_texture = Some(ctx.load_texture(
                    "layout_preview",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
            }
        }
    }
}

pub fn request_preview(
    state: &LayoutState,
    front: Option<Arc<DynamicImage>>,
    back: Option<Arc<DynamicImage>>,
    command_tx: &CommandSender,
) {
    if let Err(e) = state.options.validate() {
        log::warn!("Layout not updated: {e}");
        return;
    }
    let _ = command_tx.send(ScanCommand::ComposePreview {
        front,
        back,
        width_px: PREVIEW_WIDTH_PX,
        options: state.options.clone(),
    });
}

/// Page preview with layout settings and export. Returns true when the
/// preview should be recomposed.
pub fn show_layout(
    ui: &mut egui::Ui,
    state: &mut LayoutState,
    front: Option<&Arc<DynamicImage>>,
    back: Option<&Arc<DynamicImage>>,
    command_tx: &CommandSender,
) -> bool {
    let mut changed = false;

    ui.horizontal_top(|ui| {
        match &state.preview_texture {
            Some(texture) => {
                ui.add(egui::Image::new(texture).max_height(PREVIEW_DISPLAY_HEIGHT));
            }
            None => {
                ui.label("Page preview appears once both sides are corrected");
            }
        }

        ui.separator();

        ui.vertical(|ui| {
            ui.heading("Page layout");
            changed |= LayoutOptionsEditor::new(&mut state.options).show(ui);

            ui.horizontal(|ui| {
                if ui.button("Load layout...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("JSON", &["json"])
                        .pick_file()
                    {
                        let _ = command_tx.send(ScanCommand::LoadLayoutConfig { path });
                    }
                }
                if ui.button("Reset").clicked() {
                    state.options = LayoutOptions::default();
                    changed = true;
                }
            });

            ui.add_space(10.0);

            let both = front.zip(back);
            if ui
                .add_enabled(both.is_some(), egui::Button::new("💾 Export PDF"))
                .clicked()
            {
                if let Some((front, back)) = both {
                    if let Some(output_path) = rfd::FileDialog::new()
                        .add_filter("PDF", &["pdf"])
                        .set_file_name(DEFAULT_PDF_NAME)
                        .save_file()
                    {
                        log::info!("Exporting {}...", output_path.display());
                        let _ = command_tx.send(ScanCommand::Export {
                            front: Arc::clone(front),
                            back: Arc::clone(back),
                            options: state.options.clone(),
                            output_path,
                        });
                    }
                }
            }
        });
    });

    changed
}
