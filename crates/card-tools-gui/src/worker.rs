use card_async_runtime::{CommandReceiver, ScanCommand, UpdateSender};

use crate::handlers;

/// Async worker task that processes scan and layout commands and sends updates
pub async fn worker_task(mut command_rx: CommandReceiver, update_tx: UpdateSender) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut command_rx, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(
    cmd: ScanCommand,
    command_rx: &mut CommandReceiver,
    update_tx: &UpdateSender,
) {
    log::debug!("Worker received {} command", cmd.name());

    match cmd {
        ScanCommand::Decode { side, bytes } => {
            handlers::scan::handle_decode(side, bytes, update_tx).await;
        }
        ScanCommand::Detect { side, token, bytes } => {
            handlers::scan::handle_detect(side, token, bytes, update_tx).await;
        }
        ScanCommand::Warp { request } => {
            handlers::scan::handle_warp(request, update_tx).await;
        }
        ScanCommand::ComposePreview {
            mut front,
            mut back,
            mut width_px,
            mut options,
        } => {
            // Drain any queued preview commands, keeping only the most recent
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let ScanCommand::ComposePreview {
                    front: new_front,
                    back: new_back,
                    width_px: new_width,
                    options: new_options,
                } = next_cmd
                {
                    log::debug!("Discarding queued preview, using newer request");
                    front = new_front;
                    back = new_back;
                    width_px = new_width;
                    options = new_options;
                } else {
                    // Non-preview command found; it cannot be put back, so run it first
                    Box::pin(process_command(next_cmd, command_rx, update_tx)).await;
                }
            }

            handlers::layout::handle_preview(front, back, width_px, options, update_tx).await;
        }
        ScanCommand::Export {
            front,
            back,
            options,
            output_path,
        } => {
            handlers::layout::handle_export(front, back, options, output_path, update_tx).await;
        }
        ScanCommand::LoadLayoutConfig { path } => {
            handlers::layout::handle_load_config(path, update_tx).await;
        }
    }
}
