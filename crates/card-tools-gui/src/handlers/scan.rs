use card_async_runtime::{ImageToken, ScanUpdate, Side, UpdateSender, WarpRequest};
use card_scan::WarpParams;
use std::sync::Arc;

pub async fn handle_decode(side: Side, bytes: Vec<u8>, update_tx: &UpdateSender) {
    // Full-resolution decoding is CPU-bound, spawn blocking
    let result = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes).map(|image| (image, bytes))
    })
    .await;

    let update = match result {
        Ok(Ok((image, bytes))) => ScanUpdate::Decoded { side, image, bytes },
        Ok(Err(e)) => ScanUpdate::DecodeFailed {
            side,
            message: format!("Cannot open image: {e}"),
        },
        Err(e) => ScanUpdate::DecodeFailed {
            side,
            message: format!("Decode task failed: {e}"),
        },
    };
    let _ = update_tx.send(update);
}

pub async fn handle_detect(
    side: Side,
    token: ImageToken,
    bytes: Vec<u8>,
    update_tx: &UpdateSender,
) {
    match card_scan::detect(bytes).await {
        Ok(detection) => {
            if detection.found {
                log::info!("{}: card outline detected", side.name());
            } else {
                log::info!("{}: no card outline found, adjust the corners by hand", side.name());
            }
            let _ = update_tx.send(ScanUpdate::Detected {
                side,
                token,
                quad: detection.quad,
                found: detection.found,
            });
        }
        Err(e) => {
            let _ = update_tx.send(ScanUpdate::DetectFailed {
                side,
                token,
                message: format!("Failed to detect card: {e}"),
            });
        }
    }
}

pub async fn handle_warp(request: WarpRequest, update_tx: &UpdateSender) {
    let WarpRequest {
        side,
        token,
        image,
        quad,
        rotation_degrees,
        padding_px,
        refine,
    } = request;
    let params = WarpParams {
        rotation_degrees,
        padding_px,
        refine,
    };

    // Warp and encode are CPU-bound, spawn blocking
    let result = tokio::task::spawn_blocking(move || {
        let card = card_scan::warp_card(&image, &quad, &params)?;
        let png = card_scan::encode_png(&card)?;
        Ok::<_, card_scan::ScanError>((card, png))
    })
    .await;

    match result {
        Ok(Ok((card, png))) => {
            log::info!(
                "{}: corrected card is {}x{}",
                side.name(),
                card.width(),
                card.height()
            );
            let _ = update_tx.send(ScanUpdate::Warped {
                side,
                token,
                png,
                image: Arc::new(card),
            });
        }
        Ok(Err(e)) => {
            let _ = update_tx.send(ScanUpdate::WarpFailed {
                side,
                token,
                message: format!("Failed to correct perspective: {e}"),
            });
        }
        Err(e) => {
            let _ = update_tx.send(ScanUpdate::WarpFailed {
                side,
                token,
                message: format!("Warp task failed: {e}"),
            });
        }
    }
}
