use card_editor::Quad;
use card_scan::*;
use image::{ColorType, DynamicImage, GenericImageView, Rgb, RgbImage};
use std::sync::Arc;

/// Red card region inside a blue frame.
fn source() -> DynamicImage {
    let img = RgbImage::from_fn(300, 200, |x, y| {
        if (50..150).contains(&x) && (50..100).contains(&y) {
            Rgb([200, 20, 20])
        } else {
            Rgb([20, 20, 200])
        }
    });
    DynamicImage::ImageRgb8(img)
}

fn card_quad() -> Quad {
    Quad::from([[50.0, 50.0], [150.0, 50.0], [150.0, 100.0], [50.0, 100.0]])
}

#[test]
fn test_warp_size_includes_padding() {
    let params = WarpParams::default();
    let card = warp_card(&source(), &card_quad(), &params).unwrap();

    assert_eq!(card.dimensions(), (140, 90));
    assert_eq!(card.color(), ColorType::Rgba8);
}

#[test]
fn test_refined_padding_is_transparent_white() {
    let card = warp_card(&source(), &card_quad(), &WarpParams::default()).unwrap();

    assert_eq!(card.get_pixel(0, 0).0, [255, 255, 255, 0]);
    let center = card.get_pixel(70, 45).0;
    assert_eq!(center[3], 255);
    assert!(center[0] > 150 && center[2] < 80, "center was {:?}", center);
}

#[test]
fn test_unrefined_output_is_rgb_on_white() {
    let params = WarpParams {
        refine: false,
        ..WarpParams::default()
    };
    let card = warp_card(&source(), &card_quad(), &params).unwrap();

    assert_eq!(card.color(), ColorType::Rgb8);
    assert_eq!(card.to_rgb8().get_pixel(0, 0).0, [255, 255, 255]);
}

#[test]
fn test_corner_order_does_not_matter() {
    let shuffled = Quad::from([[150.0, 100.0], [50.0, 50.0], [50.0, 100.0], [150.0, 50.0]]);
    let card = warp_card(&source(), &shuffled, &WarpParams::default()).unwrap();
    assert_eq!(card.dimensions(), (140, 90));
}

#[test]
fn test_rotation_keeps_size() {
    let params = WarpParams {
        rotation_degrees: 90.0,
        padding_px: 0,
        refine: true,
    };
    let card = warp_card(&source(), &card_quad(), &params).unwrap();

    assert_eq!(card.dimensions(), (100, 50));
    // Corners rotated out of the card are filled transparent
    assert_eq!(card.get_pixel(0, 0).0[3], 0);
}

#[test]
fn test_zero_padding_leaves_card_edge_to_edge() {
    let params = WarpParams {
        padding_px: 0,
        ..WarpParams::default()
    };
    let card = warp_card(&source(), &card_quad(), &params).unwrap();
    assert_eq!(card.dimensions(), (100, 50));
    assert_eq!(card.get_pixel(50, 25).0[3], 255);
}

#[test]
fn test_collinear_quad_is_degenerate() {
    let line = Quad::from([[0.0, 0.0], [10.0, 10.0], [20.0, 20.0], [30.0, 30.0]]);
    let result = warp_card(&source(), &line, &WarpParams::default());
    match result {
        Err(ScanError::DegenerateQuad(_)) => {}
        other => panic!("Expected DegenerateQuad error, got {:?}", other),
    }
}

#[test]
fn test_png_output_decodes() {
    let bytes = warp_card_png(&source(), &card_quad(), &WarpParams::default()).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (140, 90));
}

#[tokio::test]
async fn test_async_warp() {
    let bytes = warp(Arc::new(source()), card_quad(), WarpParams::default())
        .await
        .unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn test_huge_quad_is_rejected_before_allocating() {
    let small = DynamicImage::new_rgb8(100, 60);
    let huge = Quad::from([[0.0, 0.0], [1e9, 0.0], [1e9, 1e9], [0.0, 1e9]]);
    let result = warp_card(&small, &huge, &WarpParams::default());
    match result {
        Err(ScanError::TooLarge(_)) => {}
        other => panic!("Expected TooLarge error, got {:?}", other),
    }
}

#[test]
fn test_padding_cannot_push_output_past_limit() {
    let params = WarpParams {
        padding_px: u32::MAX / 2 + 1,
        ..WarpParams::default()
    };
    assert!(matches!(
        warp_card(&source(), &card_quad(), &params),
        Err(ScanError::TooLarge(_))
    ));

    let params = WarpParams {
        padding_px: MAX_OUTPUT_SIDE / 2,
        ..WarpParams::default()
    };
    assert!(matches!(
        warp_card(&source(), &card_quad(), &params),
        Err(ScanError::TooLarge(_))
    ));
}

#[tokio::test]
async fn test_async_warp_reports_oversized_quad() {
    let huge = Quad::from([[0.0, 0.0], [5e5, 0.0], [5e5, 3e5], [0.0, 3e5]]);
    let result = warp(Arc::new(source()), huge, WarpParams::default()).await;
    assert!(matches!(result, Err(ScanError::TooLarge(_))));
}
