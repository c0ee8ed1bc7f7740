use crate::constants::{IMAGE_DPI, PDF_TITLE, mm_to_pt};
use crate::options::LayoutOptions;
use crate::placement::{orient_landscape, place_cards};
use crate::types::{LayoutError, Result};
use image::DynamicImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, RawImage, RawImageData, RawImageFormat,
    XObjectTransform,
};
use std::path::Path;
use std::sync::Arc;

/// Write the single-page card PDF to `output_path`.
pub async fn write_pdf(
    front: Arc<DynamicImage>,
    back: Arc<DynamicImage>,
    options: &LayoutOptions,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    // PDF generation is CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || export_pdf(&front, &back, &options)).await??;

    tokio::fs::write(&output_path, bytes).await?;
    log::info!("Wrote {}", output_path.display());

    Ok(())
}

/// Build a one-page PDF with the front above the back, both at card size.
pub fn export_pdf(
    front: &DynamicImage,
    back: &DynamicImage,
    options: &LayoutOptions,
) -> Result<Vec<u8>> {
    options.validate()?;
    check_not_empty(front, "front")?;
    check_not_empty(back, "back")?;

    let mut doc = PdfDocument::new(PDF_TITLE);
    let placement = place_cards(options);
    let mut ops = Vec::new();

    for (image, rect) in [(front, placement.front), (back, placement.back)] {
        let card = orient_landscape(image);
        let raw = flatten_on_white(&card);
        let (px_w, px_h) = (raw.width as f32, raw.height as f32);
        let id = doc.add_image(&raw);

        ops.push(Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(Pt(mm_to_pt(rect.x_mm))),
                translate_y: Some(Pt(mm_to_pt(rect.bottom_mm(options.page_height_mm)))),
                scale_x: Some(mm_to_pt(rect.width_mm) / px_w),
                scale_y: Some(mm_to_pt(rect.height_mm) / px_h),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        });
    }

    doc.pages.push(PdfPage::new(
        Mm(options.page_width_mm),
        Mm(options.page_height_mm),
        ops,
    ));

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        log::debug!("PDF writer reported {} warnings", warnings.len());
    }

    Ok(bytes)
}

fn check_not_empty(image: &DynamicImage, side: &'static str) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(LayoutError::EmptyImage(side));
    }
    Ok(())
}

/// Composite transparent pixels over white and emit RGB8 samples.
fn flatten_on_white(image: &DynamicImage) -> RawImage {
    let rgba = image.to_rgba8();
    let mut data = Vec::with_capacity(rgba.width() as usize * rgba.height() as usize * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u16;
        for channel in [r, g, b] {
            let blended = (channel as u16 * alpha + 255 * (255 - alpha)) / 255;
            data.push(blended as u8);
        }
    }

    RawImage {
        pixels: RawImageData::U8(data),
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}
