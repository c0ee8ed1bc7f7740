use card_layout::*;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::sync::Arc;

fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_default_placement_on_a4() {
    let placement = place_cards(&LayoutOptions::default());

    assert!(approx(placement.front.x_mm, 62.2));
    assert!(approx(placement.front.y_mm, 89.5));
    assert!(approx(placement.back.x_mm, 62.2));
    assert!(approx(placement.back.y_mm, 153.5));
    assert!(approx(placement.front.width_mm, 85.6));
    assert!(approx(placement.back.height_mm, 54.0));
}

#[test]
fn test_front_sits_above_back_in_pdf_coordinates() {
    let options = LayoutOptions::default();
    let placement = place_cards(&options);

    let front_bottom = placement.front.bottom_mm(options.page_height_mm);
    let back_bottom = placement.back.bottom_mm(options.page_height_mm);
    assert!(approx(front_bottom, 153.5));
    assert!(approx(back_bottom, 89.5));
    assert!(front_bottom > back_bottom);
}

#[test]
fn test_portrait_images_turn_landscape() {
    let portrait = solid(54, 86, [0, 0, 0]);
    let turned = orient_landscape(&portrait);
    assert_eq!((turned.width(), turned.height()), (86, 54));

    let landscape = solid(86, 54, [0, 0, 0]);
    assert_eq!(orient_landscape(&landscape).width(), 86);
}

#[test]
fn test_preview_placeholder_when_side_missing() {
    let front = solid(856, 540, [255, 0, 0]);
    let page = compose_preview(Some(&front), None, 210, &LayoutOptions::default()).unwrap();

    assert_eq!(page.dimensions(), (210, 297));
    assert!(page.pixels().all(|p| p.0 == [0xee, 0xee, 0xee, 0xff]));
}

#[test]
fn test_preview_draws_front_over_back() {
    let front = solid(856, 540, [255, 0, 0]);
    let back = solid(856, 540, [0, 0, 255]);
    let page = compose_preview(Some(&front), Some(&back), 210, &LayoutOptions::default()).unwrap();

    // One pixel per millimeter
    assert_eq!(page.get_pixel(5, 5).0, [255, 255, 255, 255]);
    assert_eq!(page.get_pixel(105, 116).0, [255, 0, 0, 255]);
    assert_eq!(page.get_pixel(105, 180).0, [0, 0, 255, 255]);
    assert_eq!(page.get_pixel(105, 148).0, [255, 255, 255, 255]);
}

#[test]
fn test_preview_blends_transparent_padding_over_page() {
    let mut card = RgbaImage::from_pixel(856, 540, Rgba([255, 255, 255, 0]));
    for y in 100..440 {
        for x in 100..756 {
            card.put_pixel(x, y, Rgba([0, 255, 0, 255]));
        }
    }
    let card = DynamicImage::ImageRgba8(card);
    let page = compose_preview(Some(&card), Some(&card), 210, &LayoutOptions::default()).unwrap();

    assert_eq!(page.get_pixel(63, 90).0, [255, 255, 255, 255]);
    assert_eq!(page.get_pixel(105, 116).0, [0, 255, 0, 255]);
}

#[test]
fn test_preview_rejects_zero_width() {
    let result = compose_preview(None, None, 0, &LayoutOptions::default());
    assert!(matches!(result, Err(LayoutError::Config(_))));
}

#[test]
fn test_export_pdf_produces_document() {
    let front = solid(428, 270, [200, 10, 10]);
    let back = solid(270, 428, [10, 10, 200]);
    let bytes = export_pdf(&front, &back, &LayoutOptions::default()).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 1000);
}

#[test]
fn test_export_pdf_rejects_empty_image() {
    let empty = DynamicImage::new_rgb8(0, 0);
    let back = solid(10, 6, [0, 0, 0]);
    let result = export_pdf(&empty, &back, &LayoutOptions::default());
    assert!(matches!(result, Err(LayoutError::EmptyImage("front"))));
}

#[tokio::test]
async fn test_write_pdf_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_PDF_NAME);

    let front = Arc::new(solid(428, 270, [200, 10, 10]));
    let back = Arc::new(solid(428, 270, [10, 10, 200]));
    write_pdf(front, back, &LayoutOptions::default(), &path)
        .await
        .unwrap();

    let written = std::fs::read(&path).unwrap();
    assert!(written.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_async_preview() {
    let front = Arc::new(solid(856, 540, [255, 0, 0]));
    let page = preview(Some(front), None, 420, &LayoutOptions::default())
        .await
        .unwrap();
    assert_eq!(page.dimensions(), (420, 594));
}
