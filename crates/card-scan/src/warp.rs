use crate::geometry::{distance, order_corners, polygon_area};
use crate::types::{Result, ScanError, WarpParams};
use card_editor::Quad;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};
use imageproc::geometric_transformations::{
    Interpolation, Projection, rotate_about_center, warp_into,
};
use std::io::Cursor;
use std::sync::Arc;

const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);
const OPAQUE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Longest side of a warped card, padding included
pub const MAX_OUTPUT_SIDE: u32 = 16384;

/// Rectify the card under `quad`, then rotate and pad it.
///
/// With `refine` the result is RGBA and all fill is transparent white,
/// otherwise it is RGB on white.
pub fn warp_card(image: &DynamicImage, quad: &Quad, params: &WarpParams) -> Result<DynamicImage> {
    let corners = quad.points().map(|p| (p.x as f32, p.y as f32));
    if corners.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(ScanError::DegenerateQuad("non-finite corner".to_string()));
    }

    let ordered = order_corners(corners);
    if polygon_area(&ordered) < 1.0 {
        return Err(ScanError::DegenerateQuad(format!(
            "corners {:?} enclose no area",
            ordered
        )));
    }

    let (width, height) = target_size(&ordered);
    if width > MAX_OUTPUT_SIDE || height > MAX_OUTPUT_SIDE {
        return Err(ScanError::TooLarge(format!(
            "corners {:?} span {}x{} px, the limit is {} px per side",
            ordered, width, height, MAX_OUTPUT_SIDE
        )));
    }
    let (padded_width, padded_height) = padded_size(width, height, params.padding_px)?;
    if padded_width > MAX_OUTPUT_SIDE || padded_height > MAX_OUTPUT_SIDE {
        return Err(ScanError::TooLarge(format!(
            "padded card would be {}x{} px, the limit is {} px per side",
            padded_width, padded_height, MAX_OUTPUT_SIDE
        )));
    }
    let destination = [
        (0.0, 0.0),
        ((width - 1) as f32, 0.0),
        ((width - 1) as f32, (height - 1) as f32),
        (0.0, (height - 1) as f32),
    ];
    let projection = Projection::from_control_points(ordered, destination).ok_or_else(|| {
        ScanError::DegenerateQuad(format!("no projective solution for {:?}", ordered))
    })?;

    let fill = if params.refine {
        TRANSPARENT_WHITE
    } else {
        OPAQUE_WHITE
    };

    // Source alpha is discarded; the card itself is always opaque.
    let source = DynamicImage::ImageRgb8(image.to_rgb8()).to_rgba8();
    let mut card = RgbaImage::from_pixel(width, height, fill);
    warp_into(&source, &projection, Interpolation::Bilinear, fill, &mut card);

    if params.rotation_degrees.is_finite() && params.rotation_degrees != 0.0 {
        // imageproc rotates clockwise for positive angles
        let theta = -params.rotation_degrees.to_radians();
        card = rotate_about_center(&card, theta, Interpolation::Bilinear, fill);
    }

    if params.padding_px > 0 {
        card = pad(&card, params.padding_px, fill);
    }

    log::debug!(
        "Warped card to {}x{} (rotation {}, padding {}, refine {})",
        card.width(),
        card.height(),
        params.rotation_degrees,
        params.padding_px,
        params.refine
    );

    let card = DynamicImage::ImageRgba8(card);
    Ok(if params.refine {
        card
    } else {
        DynamicImage::ImageRgb8(card.to_rgb8())
    })
}

/// `warp_card` followed by PNG encoding.
pub fn warp_card_png(image: &DynamicImage, quad: &Quad, params: &WarpParams) -> Result<Vec<u8>> {
    let card = warp_card(image, quad, params)?;
    encode_png(&card)
}

/// Async wrapper that runs the warp on the blocking pool.
pub async fn warp(image: Arc<DynamicImage>, quad: Quad, params: WarpParams) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || warp_card_png(&image, &quad, &params)).await?
}

pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ScanError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Output size: the longer of each pair of opposing edges, at least 1 px.
fn target_size(ordered: &[(f32, f32); 4]) -> (u32, u32) {
    let [tl, tr, br, bl] = *ordered;
    let width = distance(tl, tr).max(distance(br, bl));
    let height = distance(tl, bl).max(distance(tr, br));
    ((width as u32).max(1), (height as u32).max(1))
}

fn padded_size(width: u32, height: u32, padding: u32) -> Result<(u32, u32)> {
    let border = padding.checked_mul(2);
    let grow = |side: u32| border.and_then(|b| side.checked_add(b));
    match (grow(width), grow(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(ScanError::TooLarge(format!(
            "padding of {} px overflows the output size",
            padding
        ))),
    }
}

fn pad(card: &RgbaImage, padding: u32, fill: Rgba<u8>) -> RgbaImage {
    let mut padded = RgbaImage::from_pixel(
        card.width() + 2 * padding,
        card.height() + 2 * padding,
        fill,
    );
    imageops::replace(&mut padded, card, padding as i64, padding as i64);
    padded
}
