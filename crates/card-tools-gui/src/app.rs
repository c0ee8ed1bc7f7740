use card_async_runtime::{CommandSender, ScanUpdate, Side, UpdateReceiver};
use eframe::egui;
use std::time::Duration;

use crate::logger::AppLogger;
use crate::views::{
    IMAGE_EXTENSIONS, LayoutState, PaneView, request_preview, show_layout, show_pane,
};

const FAST_POLL: Duration = Duration::from_millis(50);
const IDLE_POLL: Duration = Duration::from_millis(250);

pub struct CardToolsApp {
    panes: [PaneView; 2],
    layout: LayoutState,
    logger: AppLogger,
    show_log: bool,

    // Async infrastructure
    command_tx: CommandSender,
    update_rx: UpdateReceiver,

    _tokio_handle: tokio::runtime::Handle,
}

impl CardToolsApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let ((command_tx, command_rx), (update_tx, update_rx)) = card_async_runtime::channels();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        let app = Self {
            panes: Side::ALL.map(PaneView::new),
            layout: LayoutState::default(),
            logger,
            show_log: false,
            command_tx,
            update_rx,
            _tokio_handle: tokio_handle,
        };
        app.refresh_preview();
        app
    }

    fn pane_mut(&mut self, side: Side) -> &mut PaneView {
        match side {
            Side::Front => &mut self.panes[0],
            Side::Back => &mut self.panes[1],
        }
    }

    fn refresh_preview(&self) {
        let [front, back] = &self.panes;
        request_preview(
            &self.layout,
            front.result_image().cloned(),
            back.result_image().cloned(),
            &self.command_tx,
        );
    }

    /// Route dropped files to the pane under the pointer, or the first empty one.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (dropped, pointer) =
            ctx.input(|i| (i.raw.dropped_files.clone(), i.pointer.hover_pos()));

        for file in dropped {
            let target = pointer
                .and_then(|p| self.panes.iter().position(|v| v.area.contains(p)))
                .or_else(|| {
                    self.panes
                        .iter()
                        .position(|v| v.pane.editor().image_size().is_none())
                })
                .unwrap_or(0);
            let view = &mut self.panes[target];

            if let Some(bytes) = file.bytes {
                view.open_bytes(bytes.to_vec(), &self.command_tx);
            } else if let Some(path) = file.path {
                let supported = path
                    .extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| {
                        IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
                    });
                if supported {
                    view.open_path(&path, &self.command_tx);
                } else {
                    log::warn!("Ignoring dropped file {}", path.display());
                }
            }
        }
    }

    fn handle_update(&mut self, ctx: &egui::Context, update: ScanUpdate) {
        match update {
            ScanUpdate::Decoded { side, image, bytes } => {
                let command_tx = self.command_tx.clone();
                self.pane_mut(side).on_decoded(ctx, image, bytes, &command_tx);
            }
            ScanUpdate::DecodeFailed { side, message } => {
                self.pane_mut(side).on_decode_failed(&message);
            }
            ScanUpdate::Detected {
                side, token, quad, ..
            } => {
                self.pane_mut(side).pane.on_detected(token, quad);
            }
            ScanUpdate::DetectFailed {
                side,
                token,
                message,
            } => {
                self.pane_mut(side).pane.on_detect_failed(token, message);
            }
            ScanUpdate::Warped {
                side,
                token,
                png,
                image,
            } => {
                if self.pane_mut(side).on_warped(ctx, token, png, image) {
                    self.refresh_preview();
                }
            }
            ScanUpdate::WarpFailed {
                side,
                token,
                message,
            } => {
                self.pane_mut(side).pane.on_warp_failed(token, message);
            }
            ScanUpdate::PreviewComposed {
                width,
                height,
                rgba_data,
            } => {
                self.layout.set_preview(ctx, width, height, &rgba_data);
            }
            ScanUpdate::Exported { path } => {
                log::info!("Saved {}", path.display());
            }
            ScanUpdate::LayoutConfigLoaded { options } => {
                self.layout.options = options;
                log::info!("Layout settings loaded");
                self.refresh_preview();
            }
            ScanUpdate::Error { message } => {
                log::error!("{message}");
            }
        }
    }

    fn show_status(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.toggle_value(&mut self.show_log, "📜 Log");
            ui.separator();
            ui.label(self.logger.latest_message().unwrap_or_default());
        });

        if self.show_log {
            ui.separator();
            egui::ScrollArea::vertical()
                .max_height(160.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for entry in self.logger.get_entries() {
                        ui.label(format!(
                            "{} {:<5} [{}] {}",
                            entry.timestamp.format("%H:%M:%S"),
                            entry.level,
                            entry.target,
                            entry.message
                        ));
                    }
                });
            if ui.button("Clear log").clicked() {
                self.logger.clear();
            }
        }
    }
}

impl eframe::App for CardToolsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // Process all pending updates from worker
        let mut received = false;
        while let Ok(update) = self.update_rx.try_recv() {
            self.handle_update(ctx, update);
            received = true;
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.show_status(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                for (column, view) in columns.iter_mut().zip(self.panes.iter_mut()) {
                    show_pane(column, view, &self.command_tx);
                }
            });

            ui.separator();

            let [front, back] = &self.panes;
            let changed = show_layout(
                ui,
                &mut self.layout,
                front.result_image(),
                back.result_image(),
                &self.command_tx,
            );
            if changed {
                self.refresh_preview();
            }
        });

        // Updates arrive on another thread, so the channel is polled
        let busy = self
            .panes
            .iter()
            .any(|v| v.is_decoding() || v.pane.is_detecting() || v.pane.is_warping());
        let poll = if busy || received {
            FAST_POLL
        } else {
            IDLE_POLL
        };
        ctx.request_repaint_after(poll);
    }
}
