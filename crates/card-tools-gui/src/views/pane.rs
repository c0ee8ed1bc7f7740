use card_async_runtime::{CommandSender, ImageToken, ScanCommand, Side};
use card_editor::{Canvas, Pane};
use eframe::egui;
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;

use crate::canvas::{CanvasInput, show_canvas};
use crate::ui_components::{SliderBuilder, ZoomAction, ZoomControls};

/// Largest texture side uploaded for display; the warp always uses the full image
const DISPLAY_MAX_SIDE: u32 = 4096;

const CANVAS_HEIGHT: f32 = 380.0;
const THUMBNAIL_HEIGHT: f32 = 110.0;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp", "tif", "tiff"];

/// One side's editor with its textures
pub struct PaneView {
    pub pane: Pane,
    input: CanvasInput,
    source_texture: Option<egui::TextureHandle>,
    result_texture: Option<egui::TextureHandle>,
    result_image: Option<Arc<DynamicImage>>,
    /// A picked photo is being decoded by the worker
    decoding: bool,
    /// Screen area of the last frame, used to route dropped files
    pub area: egui::Rect,
}

impl PaneView {
    pub fn new(side: Side) -> Self {
        Self {
            pane: Pane::new(side, Canvas::default()),
            input: CanvasInput::default(),
            source_texture: None,
            result_texture: None,
            result_image: None,
            decoding: false,
            area: egui::Rect::NOTHING,
        }
    }

    pub fn side(&self) -> Side {
        self.pane.side()
    }

    pub fn result_image(&self) -> Option<&Arc<DynamicImage>> {
        self.result_image.as_ref()
    }

    pub fn is_decoding(&self) -> bool {
        self.decoding
    }

    pub fn open_path(&mut self, path: &Path, command_tx: &CommandSender) {
        match std::fs::read(path) {
            Ok(bytes) => self.open_bytes(bytes, command_tx),
            Err(e) => log::warn!("{}: cannot read {}: {e}", self.side().name(), path.display()),
        }
    }

    /// Hand the photo to the worker for decoding; the pane keeps showing
    /// its current image until [`PaneView::on_decoded`].
    pub fn open_bytes(&mut self, bytes: Vec<u8>, command_tx: &CommandSender) {
        self.decoding = true;
        let side = self.side();
        log::info!("{}: opening photo...", side.name());
        let _ = command_tx.send(ScanCommand::Decode { side, bytes });
    }

    pub fn on_decoded(
        &mut self,
        ctx: &egui::Context,
        image: DynamicImage,
        bytes: Vec<u8>,
        command_tx: &CommandSender,
    ) {
        self.decoding = false;
        let request = self.pane.open_decoded(image, bytes);
        self.upload_source(ctx);
        log::info!("{}: detecting card...", self.side().name());
        let _ = command_tx.send(ScanCommand::from(request));
    }

    pub fn on_decode_failed(&mut self, message: &str) {
        self.decoding = false;
        log::warn!("{}: {message}", self.side().name());
    }

    /// Accept a warp result. Returns false for a stale result.
    pub fn on_warped(
        &mut self,
        ctx: &egui::Context,
        token: ImageToken,
        png: Vec<u8>,
        image: Arc<DynamicImage>,
    ) -> bool {
        if !self.pane.on_warped(token, png) {
            return false;
        }
        let name = format!("{}_result", self.side().name());
        self.result_texture = Some(load_texture(ctx, &name, &image));
        self.result_image = Some(image);
        true
    }

    fn upload_source(&mut self, ctx: &egui::Context) {
        self.source_texture = self.pane.source().map(|source| {
            let name = format!("{}_source", self.pane.side().name());
            load_texture(ctx, &name, source)
        });
    }
}

fn load_texture(ctx: &egui::Context, name: &str, image: &DynamicImage) -> egui::TextureHandle {
    let display = if image.width().max(image.height()) > DISPLAY_MAX_SIDE {
        image.thumbnail(DISPLAY_MAX_SIDE, DISPLAY_MAX_SIDE)
    } else {
        image.clone()
    };
    let rgba = display.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

pub fn show_pane(ui: &mut egui::Ui, view: &mut PaneView, command_tx: &CommandSender) {
    let area = ui
        .vertical(|ui| pane_contents(ui, view, command_tx))
        .response
        .rect;
    view.area = area;
}

fn pane_contents(ui: &mut egui::Ui, view: &mut PaneView, command_tx: &CommandSender) {
    ui.heading(view.side().name());

    ui.horizontal(|ui| {
        if ui.button("📂 Open photo...").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
            {
                view.open_path(&path, command_tx);
            }
        }

        ui.separator();

        let loaded = view.pane.editor().image_size().is_some();
        let percent = view.pane.editor().zoom_percent();
        match ZoomControls::new(percent, loaded).show(ui) {
            Some(ZoomAction::In) => {
                view.pane.editor_mut().zoom_in();
            }
            Some(ZoomAction::Out) => {
                view.pane.editor_mut().zoom_out();
            }
            None => {}
        }

        if view.decoding {
            ui.spinner();
            ui.label("Opening...");
        } else if view.pane.is_detecting() {
            ui.spinner();
            ui.label("Detecting...");
        }
    });

    let texture = view.source_texture.as_ref().map(|t| t.id());
    let size = egui::vec2(ui.available_width(), CANVAS_HEIGHT);
    show_canvas(ui, view.pane.editor_mut(), &mut view.input, texture, size);

    ui.horizontal(|ui| {
        SliderBuilder::new(&mut view.pane.rotation_degrees, -180.0..=180.0)
            .text("Rotate")
            .suffix("°")
            .show(ui);

        let label = if view.pane.is_warping() {
            "Applying..."
        } else {
            "✔ Apply"
        };
        if ui
            .add_enabled(view.pane.can_warp(), egui::Button::new(label))
            .clicked()
        {
            if let Some(request) = view.pane.request_warp() {
                log::info!("{}: correcting perspective...", view.side().name());
                let _ = command_tx.send(ScanCommand::from(request));
            }
        }
    });

    if let Some(error) = view.pane.last_error() {
        ui.colored_label(egui::Color32::LIGHT_RED, error);
    }

    match &view.result_texture {
        Some(texture) => {
            ui.add(egui::Image::new(texture).max_height(THUMBNAIL_HEIGHT));
        }
        None => {
            ui.label("No corrected card yet");
        }
    }
}
