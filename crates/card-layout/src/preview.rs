use crate::constants::{PAGE_WHITE, PLACEHOLDER_GRAY};
use crate::options::LayoutOptions;
use crate::placement::{orient_landscape, place_cards};
use crate::types::*;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use std::sync::Arc;

/// Raster preview of the page, `width_px` wide with the page aspect ratio.
///
/// Until both sides are present the whole page is the placeholder gray.
pub fn compose_preview(
    front: Option<&DynamicImage>,
    back: Option<&DynamicImage>,
    width_px: u32,
    options: &LayoutOptions,
) -> Result<RgbaImage> {
    options.validate()?;
    if width_px == 0 {
        return Err(LayoutError::Config(
            "Preview width must be at least one pixel".to_string(),
        ));
    }

    let px_per_mm = width_px as f32 / options.page_width_mm;
    let height_px = ((options.page_height_mm * px_per_mm).round() as u32).max(1);

    let (Some(front), Some(back)) = (front, back) else {
        return Ok(RgbaImage::from_pixel(width_px, height_px, Rgba(PLACEHOLDER_GRAY)));
    };

    let mut page = RgbaImage::from_pixel(width_px, height_px, Rgba(PAGE_WHITE));
    let placement = place_cards(options);

    for (image, rect) in [(front, placement.front), (back, placement.back)] {
        let (x, y, w, h) = rect.to_pixels(px_per_mm);
        let card = orient_landscape(image).to_rgba8();
        let scaled = imageops::resize(&card, w, h, FilterType::Triangle);
        imageops::overlay(&mut page, &scaled, x, y);
    }

    Ok(page)
}

/// Async wrapper that composes on the blocking pool.
pub async fn preview(
    front: Option<Arc<DynamicImage>>,
    back: Option<Arc<DynamicImage>>,
    width_px: u32,
    options: &LayoutOptions,
) -> Result<RgbaImage> {
    let options = options.clone();
    tokio::task::spawn_blocking(move || {
        compose_preview(front.as_deref(), back.as_deref(), width_px, &options)
    })
    .await?
}
