use crate::geometry::{distance, order_corners, polygon_area};
use crate::types::{Detection, Result};
use card_editor::{Point, Quad};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, GrayImage};
use imageproc::contours::{BorderType, find_contours};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::geometry::{approximate_polygon_dp, arc_length, min_area_rect};
use imageproc::morphology::dilate;
use imageproc::point::Point as PixelPoint;

/// Longest side of the working copy used for edge detection
pub const MAX_DETECT_SIDE: u32 = 1000;

const BLUR_SIGMA: f32 = 1.1;
const CANNY_LOW: f32 = 50.0;
const CANNY_HIGH: f32 = 150.0;
const APPROX_EPSILON_RATIO: f64 = 0.02;
const MIN_AREA_RATIO: f32 = 0.02;
const MIN_ASPECT: f32 = 1.2;
const MAX_ASPECT: f32 = 2.2;

/// Decode `bytes` and locate the card outline.
pub fn detect_quad(bytes: &[u8]) -> Result<Detection> {
    let image = image::load_from_memory(bytes)?;
    Ok(detect_in_image(&image))
}

/// Locate the card outline in an already decoded image.
///
/// Never fails: when no plausible card is found the centered default box is
/// returned with `found == false`.
pub fn detect_in_image(image: &DynamicImage) -> Detection {
    let (width, height) = image.dimensions();
    let found = find_card_corners(image);

    let quad = match found {
        Some(corners) => Quad::new(corners.map(|(x, y)| Point::new(x as f64, y as f64))),
        None => fallback_quad(width, height),
    };

    log::debug!(
        "Detection on {}x{}: {}",
        width,
        height,
        if found.is_some() { "card found" } else { "fallback box" }
    );

    Detection {
        width,
        height,
        quad,
        found: found.is_some(),
    }
}

/// Centered box spanning 80% of the width and 60% of the height.
pub fn fallback_quad(width: u32, height: u32) -> Quad {
    let (cx, cy) = ((width / 2) as f64, (height / 2) as f64);
    let dw = (width as f64 * 0.4).floor();
    let dh = (height as f64 * 0.3).floor();
    Quad::from([
        [cx - dw, cy - dh],
        [cx + dw, cy - dh],
        [cx + dw, cy + dh],
        [cx - dw, cy + dh],
    ])
}

/// Async wrapper that runs detection on the blocking pool.
pub async fn detect(bytes: Vec<u8>) -> Result<Detection> {
    tokio::task::spawn_blocking(move || detect_quad(&bytes)).await?
}

fn find_card_corners(image: &DynamicImage) -> Option<[(f32, f32); 4]> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let longest = width.max(height);
    let scale = if longest > MAX_DETECT_SIDE {
        MAX_DETECT_SIDE as f32 / longest as f32
    } else {
        1.0
    };

    let mut gray = image.to_luma8();
    if scale < 1.0 {
        let w = ((width as f32 * scale) as u32).max(1);
        let h = ((height as f32 * scale) as u32).max(1);
        gray = imageops::resize(&gray, w, h, FilterType::Triangle);
    }

    let best = best_candidate(&gray)?;
    Some(best.map(|(x, y)| (x / scale, y / scale)))
}

fn best_candidate(gray: &GrayImage) -> Option<[(f32, f32); 4]> {
    let blurred = gaussian_blur_f32(gray, BLUR_SIGMA);
    let edges = canny(&blurred, CANNY_LOW, CANNY_HIGH);
    let edges = dilate(&edges, Norm::LInf, 1);

    let min_area = MIN_AREA_RATIO * gray.width() as f32 * gray.height() as f32;
    let mut best: Option<([(f32, f32); 4], f32)> = None;

    for contour in find_contours::<i32>(&edges) {
        if !matches!(contour.border_type, BorderType::Outer) || contour.parent.is_some() {
            continue;
        }
        let perimeter = arc_length(&contour.points, true);
        let approx = approximate_closed(&contour.points, APPROX_EPSILON_RATIO * perimeter);
        if approx.len() != 4 {
            continue;
        }

        let polygon: Vec<(f32, f32)> = approx.iter().map(|p| (p.x as f32, p.y as f32)).collect();
        let area = polygon_area(&polygon);
        if area < min_area {
            continue;
        }

        let rect = min_area_rect(&approx);
        let rw = distance(pixel(rect[0]), pixel(rect[1]));
        let rh = distance(pixel(rect[1]), pixel(rect[2]));
        if rw == 0.0 || rh == 0.0 {
            continue;
        }
        let ratio = rw.max(rh) / rw.min(rh).max(1.0);
        if !(MIN_ASPECT..=MAX_ASPECT).contains(&ratio) {
            continue;
        }

        let ordered = order_corners([polygon[0], polygon[1], polygon[2], polygon[3]]);
        let w = distance(ordered[0], ordered[1]);
        let h = distance(ordered[0], ordered[3]);
        let score = area + 0.5 * (w + h);

        if best.is_none_or(|(_, s)| score > s) {
            best = Some((ordered, score));
        }
    }

    best.map(|(corners, _)| corners)
}

fn pixel(p: PixelPoint<i32>) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

/// Douglas-Peucker on a closed contour.
///
/// The contour is split at the point farthest from its first point and each
/// half is simplified as an open curve.
fn approximate_closed(points: &[PixelPoint<i32>], epsilon: f64) -> Vec<PixelPoint<i32>> {
    if points.len() < 3 || epsilon.is_nan() || epsilon <= 0.0 {
        return points.to_vec();
    }

    let start = pixel(points[0]);
    let far = points
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            distance(start, pixel(**a)).total_cmp(&distance(start, pixel(**b)))
        })
        .map(|(i, _)| i)
        .unwrap_or(0);
    if far == 0 {
        return vec![points[0]];
    }

    let first = approximate_polygon_dp(&points[..=far], epsilon, false);
    let mut second_half = points[far..].to_vec();
    second_half.push(points[0]);
    let second = approximate_polygon_dp(&second_half, epsilon, false);

    // Both halves share the split point and the start point.
    let mut merged = first;
    merged.extend(second.iter().skip(1).take(second.len().saturating_sub(2)));
    merged
}
